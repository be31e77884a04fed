use serde_json::{Map, Value};

use crate::error::{ModelErr, Result};

/// Declares a closed categorical domain: the variants, their wire strings,
/// and `ALL` in the one-hot encoding order the predictor was trained on.
macro_rules! category {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($label => Some($name::$variant)),+,
                    _ => None,
                }
            }
        }
    };
}

category!(Job {
    Admin => "admin.",
    BlueCollar => "blue-collar",
    Entrepreneur => "entrepreneur",
    Housemaid => "housemaid",
    Management => "management",
    Retired => "retired",
    SelfEmployed => "self-employed",
    Services => "services",
    Student => "student",
    Technician => "technician",
    Unemployed => "unemployed",
    Unknown => "unknown",
});

category!(Marital {
    Married => "married",
    Single => "single",
    Divorced => "divorced",
});

category!(Education {
    Primary => "primary",
    Secondary => "secondary",
    Tertiary => "tertiary",
    Unknown => "unknown",
});

category!(Contact {
    Cellular => "cellular",
    Telephone => "telephone",
    Unknown => "unknown",
});

category!(Month {
    Jan => "jan",
    Feb => "feb",
    Mar => "mar",
    Apr => "apr",
    May => "may",
    Jun => "jun",
    Jul => "jul",
    Aug => "aug",
    Sep => "sep",
    Oct => "oct",
    Nov => "nov",
    Dec => "dec",
});

category!(Poutcome {
    Unknown => "unknown",
    Other => "other",
    Failure => "failure",
    Success => "success",
});

category!(YesNo {
    No => "no",
    Yes => "yes",
});

impl YesNo {
    pub fn as_f32(&self) -> f32 {
        match self {
            YesNo::No => 0.0,
            YesNo::Yes => 1.0,
        }
    }
}

/// One raw prediction request: the 16 client/campaign attributes, already
/// validated against their declared domains.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub age: u32,
    pub job: Job,
    pub marital: Marital,
    pub education: Education,
    pub default: YesNo,
    pub balance: i64,
    pub housing: YesNo,
    pub loan: YesNo,
    pub contact: Contact,
    pub day: u32,
    pub month: Month,
    pub duration: u32,
    pub campaign: u32,
    pub pdays: i64,
    pub previous: u32,
    pub poutcome: Poutcome,
}

impl ClientRecord {
    /// Validates a raw JSON mapping into a typed record.
    ///
    /// Every field is required; type or range mismatches are errors naming
    /// the offending field, never silent coercion.
    ///
    /// # Arguments
    /// * `value` - The raw `data` object of a prediction request.
    ///
    /// # Returns
    /// A validated `ClientRecord`, or the first violation found.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(ModelErr::NotAnObject)?;

        Ok(Self {
            age: int_field(obj, "age", 18, 100)? as u32,
            job: category_field(obj, "job", Job::parse)?,
            marital: category_field(obj, "marital", Marital::parse)?,
            education: category_field(obj, "education", Education::parse)?,
            default: category_field(obj, "default", YesNo::parse)?,
            balance: int_field(obj, "balance", -2000, 100_000)?,
            housing: category_field(obj, "housing", YesNo::parse)?,
            loan: category_field(obj, "loan", YesNo::parse)?,
            contact: category_field(obj, "contact", Contact::parse)?,
            day: int_field(obj, "day", 1, 31)? as u32,
            month: category_field(obj, "month", Month::parse)?,
            duration: int_field(obj, "duration", 1, 5000)? as u32,
            campaign: int_field(obj, "campaign", 1, 50)? as u32,
            pdays: int_field(obj, "pdays", -1, 500)?,
            previous: int_field(obj, "previous", 0, 50)? as u32,
            poutcome: category_field(obj, "poutcome", Poutcome::parse)?,
        })
    }
}

fn int_field(obj: &Map<String, Value>, field: &'static str, min: i64, max: i64) -> Result<i64> {
    let value = obj.get(field).ok_or(ModelErr::MissingField { field })?;
    let got = value.as_i64().ok_or(ModelErr::NotAnInteger { field })?;

    if got < min || got > max {
        return Err(ModelErr::OutOfRange {
            field,
            min,
            max,
            got,
        });
    }

    Ok(got)
}

fn category_field<T>(
    obj: &Map<String, Value>,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T> {
    let value = obj.get(field).ok_or(ModelErr::MissingField { field })?;
    let s = value.as_str().ok_or(ModelErr::NotAString { field })?;

    parse(s).ok_or_else(|| ModelErr::UnknownCategory {
        field,
        got: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_record() -> Value {
        json!({
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
        })
    }

    #[test]
    fn test_valid_record_parses() {
        let record = ClientRecord::from_json(&valid_record()).unwrap();

        assert_eq!(record.age, 30);
        assert_eq!(record.job, Job::Technician);
        assert_eq!(record.balance, 1000);
        assert_eq!(record.pdays, -1);
        assert_eq!(record.housing, YesNo::Yes);
    }

    #[test]
    fn test_unknown_job_is_rejected() {
        let mut value = valid_record();
        value["job"] = json!("astronaut");

        let err = ClientRecord::from_json(&value).unwrap_err();
        assert!(matches!(
            err,
            ModelErr::UnknownCategory { field: "job", .. }
        ));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut value = valid_record();
        value.as_object_mut().unwrap().remove("duration");

        let err = ClientRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, ModelErr::MissingField { field: "duration" }));
    }

    #[test]
    fn test_age_below_domain_is_rejected() {
        let mut value = valid_record();
        value["age"] = json!(17);

        let err = ClientRecord::from_json(&value).unwrap_err();
        assert!(matches!(
            err,
            ModelErr::OutOfRange {
                field: "age",
                min: 18,
                max: 100,
                got: 17
            }
        ));
    }

    #[test]
    fn test_string_where_integer_expected_is_rejected() {
        let mut value = valid_record();
        value["balance"] = json!("1000");

        let err = ClientRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, ModelErr::NotAnInteger { field: "balance" }));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let err = ClientRecord::from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ModelErr::NotAnObject));
    }

    #[test]
    fn test_category_round_trips_through_labels() {
        for job in Job::ALL {
            assert_eq!(Job::parse(job.as_str()), Some(*job));
        }
        for month in Month::ALL {
            assert_eq!(Month::parse(month.as_str()), Some(*month));
        }
    }
}
