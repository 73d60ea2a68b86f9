//! Integration test for the payload → dashboard snapshot flow.

use campaign_ingest::parse_campaigns;
use campaign_reporting::{DashboardSnapshot, DeviceKind};

const PAYLOAD: &str = r#"{
  "campaigns": [
    {
      "id": "c-100",
      "name": "Ramadan Nights",
      "spend": 200,
      "revenue": 800,
      "weekly_performance": [
        {"week_start": "2024-01-08", "week_end": "2024-01-14", "impressions": 2000, "clicks": 80, "conversions": 8, "spend": 60, "revenue": 240},
        {"week_start": "2024-01-01", "week_end": "2024-01-07", "impressions": 1000, "clicks": 40, "conversions": 4, "spend": 100, "revenue": 400}
      ],
      "demographic_breakdown": [
        {"gender": "Male", "age_group": "25-34", "percentage_of_audience": 30, "performance": {"impressions": 900, "clicks": 36, "conversions": 3}},
        {"gender": "Female", "age_group": "18-24", "percentage_of_audience": 70, "performance": {"impressions": 2100, "clicks": 84, "conversions": 9}}
      ],
      "device_performance": [
        {"device": "Mobile", "impressions": 100, "clicks": 10, "conversions": 1, "spend": 20, "revenue": 90},
        {"device": "Tablet", "impressions": 50, "clicks": 5, "conversions": 1, "spend": 10, "revenue": 30}
      ],
      "regional_performance": [
        {"region": "Dubai", "country": "UAE", "impressions": 500, "clicks": 20, "conversions": 2, "spend": 50, "revenue": 200},
        {"region": "Atlantis", "country": "Ocean", "impressions": 500, "clicks": 20, "conversions": 2, "spend": 50, "revenue": 9000}
      ]
    },
    {
      "id": 101,
      "name": "Winter Clearance",
      "spend": null,
      "revenue": "0",
      "weekly_performance": [
        {"week_start": "2024-01-01", "week_end": "2024-01-07", "impressions": 500, "clicks": 10, "conversions": null, "spend": 50, "revenue": 75}
      ],
      "demographic_breakdown": [
        {"gender": "Male", "age_group": "25-34", "percentage_of_audience": 0, "performance": {"impressions": 100, "clicks": 4, "conversions": 1}},
        {"gender": "Female", "age_group": "18-24", "percentage_of_audience": 0, "performance": {"impressions": 100, "clicks": 6, "conversions": 0}}
      ],
      "device_performance": [
        {"device": " Desktop ", "impressions": 300, "clicks": 15, "conversions": 3, "spend": 30, "revenue": 60}
      ],
      "regional_performance": [
        {"region": "Riyadh", "country": "Saudi Arabia", "impressions": 400, "clicks": 10, "conversions": 1, "spend": 40, "revenue": 200}
      ]
    }
  ]
}"#;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_full_snapshot_from_payload() {
    let campaigns = parse_campaigns(PAYLOAD).unwrap();
    assert_eq!(campaigns.len(), 2);

    let snapshot = DashboardSnapshot::build(&campaigns);

    // Weekly: the shared week is summed and weeks are chronological.
    let weeks = &snapshot.weekly.report.weeks;
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week_start, "2024-01-01");
    assert!(close(weeks[0].totals.spend, 150.0));
    assert!(close(snapshot.weekly.report.total_spend, 210.0));
    assert!(close(snapshot.weekly.report.avg_conversion_rate, 12.0 / 130.0));

    // Demographics: only the first campaign has a non-zero audience sum.
    let demo = &snapshot.demographics.report;
    assert!(close(demo.male[0].totals.spend, 60.0));
    assert!(close(demo.female[0].totals.spend, 140.0));
    assert_eq!(demo.male[0].totals.clicks, 40);
    assert_eq!(demo.female[0].totals.clicks, 90);
    assert_eq!(demo.age_group_spend[0].label, "18-24");

    // Devices: Tablet dropped, trimmed Desktop kept.
    let devices = &snapshot.devices;
    assert_eq!(devices.report.devices.len(), 2);
    assert!(devices.missing_devices.is_empty());
    assert!(devices.report.get(DeviceKind::Desktop).is_some());
    let comparison = devices.comparison.unwrap();
    assert!(close(comparison.revenue_delta, 30.0));
    assert!(close(comparison.mobile_revenue_share, 60.0));

    // Regions: Atlantis is unmapped and excluded despite its revenue.
    let regions = &snapshot.regions;
    assert_eq!(regions.report.regions.len(), 2);
    assert!(regions.report.regions.iter().all(|r| r.region != "Atlantis"));
    assert_eq!(regions.top_region.as_ref().unwrap().region, "Dubai");
    assert!(close(regions.report.average_roas, 4.5));

    // Summary uses campaign-level financials.
    assert_eq!(snapshot.summary.campaign_count, 2);
    assert!(close(snapshot.summary.totals.revenue, 800.0));
    assert_eq!(snapshot.campaigns[0].id, "c-100");
    assert_eq!(snapshot.campaigns[1].id, "101");
}

#[test]
fn test_empty_payload_produces_empty_views() {
    let campaigns = parse_campaigns("[]").unwrap();
    let snapshot = DashboardSnapshot::build(&campaigns);

    assert_eq!(snapshot.summary.campaign_count, 0);
    assert!(snapshot.weekly.revenue_series.is_empty());
    assert!(snapshot.demographics.table.is_empty());
    assert!(snapshot.devices.comparison.is_none());
    assert_eq!(snapshot.devices.missing_devices.len(), 2);
    assert!(snapshot.regions.bubbles.is_empty());
    assert_eq!(snapshot.regions.report.average_roas, 0.0);
}

#[test]
fn test_huge_counts_saturate_instead_of_overflowing() {
    let payload = r#"[
      {
        "id": "c-big",
        "name": "Viral",
        "spend": 10,
        "revenue": 20,
        "weekly_performance": [
          {"week_start": "2024-01-01", "week_end": "2024-01-07", "impressions": 1e19, "clicks": 1e19, "conversions": 1, "spend": 5, "revenue": 10},
          {"week_start": "2024-01-01", "week_end": "2024-01-07", "impressions": 1e19, "clicks": 1e19, "conversions": 1, "spend": 5, "revenue": 10}
        ],
        "device_performance": [
          {"device": "Mobile", "impressions": 1e19, "clicks": 1, "conversions": 0, "spend": 1, "revenue": 2},
          {"device": "Mobile", "impressions": 1e19, "clicks": 1, "conversions": 0, "spend": 1, "revenue": 2}
        ],
        "regional_performance": [
          {"region": "Dubai", "country": "UAE", "impressions": 1e19, "clicks": 1, "conversions": 0, "spend": 1, "revenue": 2},
          {"region": "Dubai", "country": "UAE", "impressions": 1e19, "clicks": 1, "conversions": 0, "spend": 1, "revenue": 2}
        ]
      }
    ]"#;
    let campaigns = parse_campaigns(payload).unwrap();
    let snapshot = DashboardSnapshot::build(&campaigns);

    let week = &snapshot.weekly.report.weeks[0];
    assert_eq!(week.totals.impressions, u64::MAX);
    assert_eq!(week.totals.clicks, u64::MAX);
    assert_eq!(week.totals.conversions, 2);
    assert_eq!(snapshot.summary.totals.impressions, u64::MAX);
    assert_eq!(
        snapshot.devices.report.get(DeviceKind::Mobile).unwrap().totals.impressions,
        u64::MAX
    );
    assert_eq!(snapshot.regions.report.regions[0].totals.impressions, u64::MAX);
}
