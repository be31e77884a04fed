use crate::domain::{ClientRecord, Contact, Education, Job, Marital, Month, Poutcome};

/// Version of the feature derivation below. Baked into every serialized
/// artifact and checked on decode, so a predictor trained against one
/// column layout can never be scored against another.
pub const TRANSFORM_VERSION: u32 = 1;

/// Total width of the feature vector: 7 raw numerics, 3 engineered
/// columns, 3 binary flags, then the one-hot categorical blocks.
pub const FEATURE_LEN: usize = 7
    + 3
    + 3
    + Job::ALL.len()
    + Marital::ALL.len()
    + Education::ALL.len()
    + Contact::ALL.len()
    + Month::ALL.len()
    + Poutcome::ALL.len();

/// Maps a validated record to the feature vector the predictor expects.
///
/// Pure and deterministic: no I/O, no side effects, same record in, same
/// columns out. The column order is fixed; changing it requires bumping
/// `TRANSFORM_VERSION`.
///
/// # Arguments
/// * `record` - A validated client record.
///
/// # Returns
/// A vector of exactly `FEATURE_LEN` values.
pub fn transform(record: &ClientRecord) -> Vec<f32> {
    let mut out = Vec::with_capacity(FEATURE_LEN);

    out.push(record.age as f32);
    out.push(record.balance as f32);
    out.push(record.day as f32);
    out.push(record.duration as f32);
    out.push(record.campaign as f32);
    out.push(record.pdays as f32);
    out.push(record.previous as f32);

    // Engineered columns. The +1 offsets keep the ratios defined for
    // age = 0 and campaign = 0 inputs.
    out.push(record.balance as f32 / (record.age + 1) as f32);
    out.push(record.duration as f32 / (record.campaign + 1) as f32);
    out.push(if record.previous > 0 { 1.0 } else { 0.0 });

    out.push(record.default.as_f32());
    out.push(record.housing.as_f32());
    out.push(record.loan.as_f32());

    one_hot(&mut out, record.job as usize, Job::ALL.len());
    one_hot(&mut out, record.marital as usize, Marital::ALL.len());
    one_hot(&mut out, record.education as usize, Education::ALL.len());
    one_hot(&mut out, record.contact as usize, Contact::ALL.len());
    one_hot(&mut out, record.month as usize, Month::ALL.len());
    one_hot(&mut out, record.poutcome as usize, Poutcome::ALL.len());

    debug_assert_eq!(out.len(), FEATURE_LEN);
    out
}

fn one_hot(out: &mut Vec<f32>, idx: usize, width: usize) {
    let start = out.len();
    out.resize(start + width, 0.0);
    out[start + idx] = 1.0;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record() -> ClientRecord {
        ClientRecord::from_json(&json!({
            "age": 30,
            "job": "technician",
            "marital": "married",
            "education": "secondary",
            "default": "no",
            "balance": 1000,
            "housing": "yes",
            "loan": "no",
            "contact": "cellular",
            "day": 15,
            "month": "may",
            "duration": 200,
            "campaign": 1,
            "pdays": -1,
            "previous": 0,
            "poutcome": "unknown"
        }))
        .unwrap()
    }

    #[test]
    fn test_engineered_columns_match_worked_example() {
        let features = transform(&record());

        let balance_per_age = features[7];
        let duration_per_campaign = features[8];
        let has_previous = features[9];

        assert!((balance_per_age - 1000.0 / 31.0).abs() < 1e-4);
        assert_eq!(duration_per_campaign, 100.0);
        assert_eq!(has_previous, 0.0);
    }

    #[test]
    fn test_has_previous_set_iff_previous_positive() {
        let mut rec = record();
        assert_eq!(transform(&rec)[9], 0.0);

        rec.previous = 3;
        assert_eq!(transform(&rec)[9], 1.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let rec = record();
        assert_eq!(transform(&rec), transform(&rec));
    }

    #[test]
    fn test_output_width_and_one_hot_blocks() {
        let features = transform(&record());
        assert_eq!(features.len(), FEATURE_LEN);

        // Exactly one hot entry per categorical block.
        let categorical = &features[13..];
        let ones = categorical.iter().filter(|v| **v == 1.0).count();
        assert_eq!(ones, 6);
    }
}
