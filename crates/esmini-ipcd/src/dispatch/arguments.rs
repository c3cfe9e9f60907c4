//! Typed extraction of command arguments.
//!
//! Every lookup is fallible: a missing field or a value of the wrong JSON type
//! becomes [`DispatchError::Validation`] naming the command and field. An
//! `args` value that is not an object fails the first lookup as field `args`.

use serde_json::{Map, Value};

use super::errors::DispatchError;
use crate::backend::{InitSettings, ObjectPose, RecordSetting};

/// Borrowed view over one command's `args` value.
pub(crate) struct Arguments<'a> {
    command: &'static str,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    pub(crate) const fn new(command: &'static str, args: &'a Value) -> Self {
        let fields = match args {
            Value::Object(fields) => Some(fields),
            _ => None,
        };
        Self { command, fields }
    }

    fn require(&self, field: &'static str, expected: &'static str) -> Result<&'a Value, DispatchError> {
        let fields = self
            .fields
            .ok_or_else(|| DispatchError::invalid_argument(self.command, "args", "an object"))?;
        fields
            .get(field)
            .ok_or_else(|| DispatchError::invalid_argument(self.command, field, expected))
    }

    fn reject(&self, field: &'static str, expected: &'static str) -> DispatchError {
        DispatchError::invalid_argument(self.command, field, expected)
    }

    pub(crate) fn string(&self, field: &'static str) -> Result<&'a str, DispatchError> {
        const EXPECTED: &str = "a string";
        self.require(field, EXPECTED)?
            .as_str()
            .ok_or_else(|| self.reject(field, EXPECTED))
    }

    pub(crate) fn number(&self, field: &'static str) -> Result<f64, DispatchError> {
        const EXPECTED: &str = "a number";
        self.require(field, EXPECTED)?
            .as_f64()
            .ok_or_else(|| self.reject(field, EXPECTED))
    }

    pub(crate) fn integer(&self, field: &'static str) -> Result<i32, DispatchError> {
        const EXPECTED: &str = "a 32-bit integer";
        self.require(field, EXPECTED)?
            .as_i64()
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| self.reject(field, EXPECTED))
    }

    /// Accepts `true`/`false` (as `1`/`0`) or a 32-bit integer.
    pub(crate) fn flag(&self, field: &'static str) -> Result<i32, DispatchError> {
        const EXPECTED: &str = "a boolean or integer";
        let value = self.require(field, EXPECTED)?;
        flag_value(value).ok_or_else(|| self.reject(field, EXPECTED))
    }

    /// Accepts a flag or a string, passed on without reinterpretation.
    pub(crate) fn record(&self, field: &'static str) -> Result<RecordSetting, DispatchError> {
        const EXPECTED: &str = "a boolean, integer, or string";
        let value = self.require(field, EXPECTED)?;
        if let Some(path) = value.as_str() {
            return Ok(RecordSetting::Path(path.to_owned()));
        }
        flag_value(value)
            .map(RecordSetting::Flag)
            .ok_or_else(|| self.reject(field, EXPECTED))
    }
}

fn flag_value(value: &Value) -> Option<i32> {
    match value {
        Value::Bool(flag) => Some(i32::from(*flag)),
        other => other.as_i64().and_then(|raw| i32::try_from(raw).ok()),
    }
}

/// Extracts `SE_Init` arguments.
pub(crate) fn init_settings(args: &Arguments<'_>) -> Result<InitSettings, DispatchError> {
    Ok(InitSettings {
        scenario_path: args.string("xosc_path")?.to_owned(),
        disable_ctrls: args.flag("disable_ctrls")?,
        use_viewer: args.flag("use_viewer")?,
        threads: args.integer("threads")?,
        record: args.record("record")?,
    })
}

/// Extracts `SE_ReportObjectPosXYH` arguments: the object name and its pose.
pub(crate) fn object_pose<'a>(
    args: &Arguments<'a>,
) -> Result<(&'a str, ObjectPose), DispatchError> {
    let object_id = args.string("object_id")?;
    let pose = ObjectPose {
        timestamp: args.number("timestamp")?,
        x: args.number("x")?,
        y: args.number("y")?,
        h: args.number("h")?,
    };
    Ok((object_id, pose))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const INIT: &str = "SE_Init";
    const POSE: &str = "SE_ReportObjectPosXYH";

    fn reference_init() -> Value {
        json!({
            "xosc_path": "scene.xosc",
            "disable_ctrls": 1,
            "use_viewer": 0,
            "threads": 1,
            "record": 0
        })
    }

    #[test]
    fn extracts_reference_init_arguments() {
        let fields = reference_init();
        let settings = init_settings(&Arguments::new(INIT, &fields)).expect("valid init");
        assert_eq!(
            settings,
            InitSettings {
                scenario_path: String::from("scene.xosc"),
                disable_ctrls: 1,
                use_viewer: 0,
                threads: 1,
                record: RecordSetting::Flag(0),
            }
        );
    }

    #[rstest]
    #[case::bool_true(json!(true), RecordSetting::Flag(1))]
    #[case::bool_false(json!(false), RecordSetting::Flag(0))]
    #[case::integer(json!(2), RecordSetting::Flag(2))]
    #[case::path(json!("run.dat"), RecordSetting::Path(String::from("run.dat")))]
    fn record_passes_through_opaquely(#[case] record: Value, #[case] expected: RecordSetting) {
        let mut fields = reference_init();
        fields["record"] = record;
        let settings = init_settings(&Arguments::new(INIT, &fields)).expect("valid init");
        assert_eq!(settings.record, expected);
    }

    #[rstest]
    #[case::bool_flags(json!(true), 1)]
    #[case::int_flags(json!(3), 3)]
    fn flags_accept_booleans_and_integers(#[case] flag: Value, #[case] expected: i32) {
        let mut fields = reference_init();
        fields["use_viewer"] = flag;
        let settings = init_settings(&Arguments::new(INIT, &fields)).expect("valid init");
        assert_eq!(settings.use_viewer, expected);
    }

    #[rstest]
    #[case::missing_path("xosc_path", None)]
    #[case::numeric_path("xosc_path", Some(json!(5)))]
    #[case::string_flag("disable_ctrls", Some(json!("yes")))]
    #[case::float_threads("threads", Some(json!(1.5)))]
    #[case::bool_threads("threads", Some(json!(true)))]
    #[case::huge_threads("threads", Some(json!(i64::MAX)))]
    #[case::null_record("record", Some(Value::Null))]
    fn rejects_missing_or_mistyped_init_fields(
        #[case] field: &'static str,
        #[case] replacement: Option<Value>,
    ) {
        let mut fields = reference_init();
        match replacement {
            Some(value) => fields[field] = value,
            None => {
                fields.as_object_mut().expect("object").remove(field);
            }
        }
        let error = init_settings(&Arguments::new(INIT, &fields)).expect_err("invalid init");
        assert!(matches!(
            error,
            DispatchError::Validation { command: INIT, field: reported, .. } if reported == field
        ));
    }

    #[test]
    fn extracts_pose_accepting_integer_coordinates() {
        let fields = json!({"object_id": "Ego", "timestamp": 0.5, "x": 10, "y": -2.5, "h": 0});
        let (object_id, pose) = object_pose(&Arguments::new(POSE, &fields)).expect("valid pose");
        assert_eq!(object_id, "Ego");
        assert_eq!(
            pose,
            ObjectPose {
                timestamp: 0.5,
                x: 10.0,
                y: -2.5,
                h: 0.0,
            }
        );
    }

    #[rstest]
    #[case::missing_object(json!({"timestamp": 0.0, "x": 0.0, "y": 0.0, "h": 0.0}), "object_id")]
    #[case::numeric_object(json!({"object_id": 1, "timestamp": 0.0, "x": 0.0, "y": 0.0, "h": 0.0}), "object_id")]
    #[case::string_x(json!({"object_id": "Ego", "timestamp": 0.0, "x": "1", "y": 0.0, "h": 0.0}), "x")]
    #[case::missing_heading(json!({"object_id": "Ego", "timestamp": 0.0, "x": 0.0, "y": 0.0}), "h")]
    fn rejects_invalid_pose_fields(#[case] fields: Value, #[case] field: &'static str) {
        let error = object_pose(&Arguments::new(POSE, &fields)).expect_err("invalid pose");
        assert!(matches!(
            error,
            DispatchError::Validation { field: reported, .. } if reported == field
        ));
    }

    #[rstest]
    #[case::number(json!(5))]
    #[case::array(json!([1, 2]))]
    #[case::string(json!("Ego"))]
    fn non_object_args_fail_validation(#[case] args: Value) {
        let error = object_pose(&Arguments::new(POSE, &args)).expect_err("invalid args");
        assert!(matches!(
            error,
            DispatchError::Validation { command: POSE, field: "args", expected: "an object" }
        ));
    }
}
