//! End-to-end tests for the forecast-allocate pipeline
//!
//! Tests complete workflows using only the facade API.

use allocation_facade::{
    AllocationError, AllocationPipeline, AllocationPolicy, DemandTable, NegativeDemand,
    OffsetAllocator, PipelineConfig, SmoothingMethod, Smoother, SyntheticConfig,
};

const EPS: f64 = 1e-9;

fn constant_table() -> DemandTable {
    DemandTable::from_columns(vec![("A", vec![10.0; 8])]).unwrap()
}

#[test]
fn e2e_constant_series_offset_policy() {
    let result = PipelineConfig::new()
        .with_alpha(0.3)
        .with_policy(AllocationPolicy::Offset { offset: 5.0 })
        .build()
        .unwrap()
        .run(&constant_table())
        .unwrap();

    let a = &result.entities["A"];
    assert!(a.forecast.iter().all(|v| (v - 10.0).abs() < EPS));
    assert!((a.window_average - 10.0).abs() < EPS);
    assert!((a.allocation - 5.0).abs() < EPS);
}

#[test]
fn e2e_constant_series_capacity_policy() {
    let result = PipelineConfig::new()
        .with_alpha(0.3)
        .with_policy(AllocationPolicy::Capacity {
            capacity: 100.0,
            negative_demand: NegativeDemand::Reject,
        })
        .build()
        .unwrap()
        .run(&constant_table())
        .unwrap();

    assert!((result.entities["A"].allocation - 100.0).abs() < EPS);
}

#[test]
fn e2e_single_entity_takes_all_capacity() {
    let table =
        DemandTable::from_columns(vec![("A", vec![20.0; 10]), ("B", vec![5.0; 10])]).unwrap();
    let result = PipelineConfig::new()
        .with_policy(AllocationPolicy::capacity())
        .build()
        .unwrap()
        .run(&table)
        .unwrap();

    let allocation = result.allocation();
    assert_eq!(allocation["A"], 100.0);
    assert_eq!(allocation["B"], 0.0);
    assert!((result.objective - 2000.0).abs() < EPS);
}

#[test]
fn e2e_both_policies_over_same_table() {
    let table = SyntheticConfig::new().with_seed(42).generate().unwrap();

    let offset = PipelineConfig::new().build().unwrap().run(&table).unwrap();
    let capacity = PipelineConfig::new()
        .with_policy(AllocationPolicy::capacity())
        .build()
        .unwrap()
        .run(&table)
        .unwrap();

    for (name, entity) in &offset.entities {
        assert_eq!(entity.window_average, capacity.entities[name].window_average);
        assert!((entity.allocation - (entity.window_average - 5.0).max(0.0)).abs() < EPS);
    }
    assert!(capacity.total_allocated() <= 100.0 + EPS);
    assert_eq!(
        capacity
            .entities
            .values()
            .filter(|e| e.allocation > 0.0)
            .count(),
        1
    );
}

#[test]
fn e2e_trailing_mean_pipeline() {
    let table = DemandTable::from_columns(vec![("A", vec![3.0, 6.0, 9.0, 12.0])]).unwrap();
    let result = PipelineConfig::new()
        .with_smoothing(SmoothingMethod::TrailingMean { window: 3 })
        .with_window(2)
        .build()
        .unwrap()
        .run(&table)
        .unwrap();

    let a = &result.entities["A"];
    assert_eq!(a.forecast, vec![3.0, 4.5, 6.0, 9.0]);
    assert!((a.window_average - 7.5).abs() < EPS);
    assert!((a.allocation - 2.5).abs() < EPS);
    assert_eq!(result.smoother, "trailing_mean");
}

#[test]
fn e2e_three_day_rolling_demand() {
    // Demand is the 3-day rolling mean ending on the last day
    let table =
        DemandTable::from_columns(vec![("A", vec![1.0, 2.0, 3.0, 4.0, 100.0])]).unwrap();
    let result = PipelineConfig::new()
        .with_smoothing(SmoothingMethod::TrailingMean { window: 3 })
        .with_window(1)
        .build()
        .unwrap()
        .run(&table)
        .unwrap();

    let a = &result.entities["A"];
    assert!((a.window_average - 107.0 / 3.0).abs() < EPS);
    assert!((a.allocation - (107.0 / 3.0 - 5.0)).abs() < EPS);
}

#[test]
fn e2e_short_series_uses_all_days() {
    let table = DemandTable::from_columns(vec![("A", vec![10.0, 20.0])]).unwrap();
    let result = PipelineConfig::new()
        .with_alpha(0.5)
        .build()
        .unwrap()
        .run(&table)
        .unwrap();
    // forecast = [10, 10]
    assert!((result.entities["A"].window_average - 10.0).abs() < EPS);
}

#[test]
fn e2e_invalid_alpha_fails_whole_batch() {
    let err = PipelineConfig::new().with_alpha(1.5).build().err().unwrap();
    assert!(matches!(err, AllocationError::InvalidInput { .. }));
}

#[test]
fn e2e_result_record_serializes() {
    let result = PipelineConfig::new()
        .build()
        .unwrap()
        .run(&constant_table())
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["policy"], "offset");
    assert_eq!(json["entities"]["A"]["forecast"].as_array().unwrap().len(), 8);
}

struct Doubling;

impl Smoother for Doubling {
    fn smooth(&self, series: &[f64]) -> allocation_facade::Result<Vec<f64>> {
        Ok(series.iter().map(|v| v * 2.0).collect())
    }

    fn name(&self) -> &str {
        "doubling"
    }
}

#[test]
fn e2e_custom_smoother_through_facade() {
    let table = DemandTable::from_columns(vec![("A", vec![4.0, 4.0])]).unwrap();
    let pipeline =
        AllocationPipeline::new(Box::new(Doubling), Box::new(OffsetAllocator::default()), 2)
            .unwrap();
    let result = pipeline.run(&table).unwrap();
    assert_eq!(result.smoother, "doubling");
    assert!((result.entities["A"].allocation - 3.0).abs() < EPS);
}
