//! Decoding of frame bodies into typed command requests.
//!
//! A body is a JSON object with a `function` name and an `args` object:
//!
//! ```json
//! {"function":"SE_Step","args":{}}
//! ```
//!
//! The name is mapped once onto [`Verb`]. The `args` value is kept as sent;
//! its shape is checked by the dispatcher for the verbs that read it, so
//! malformed documents and bad arguments stay in separate error classes.

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::DispatchError;
use crate::backend::{InitSettings, ObjectPose, RecordSetting};

/// Closed set of commands understood by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `SE_Init`: load a scenario.
    Init,
    /// `SE_ReportObjectPosXYH`: report an object's pose.
    ReportObjectPos,
    /// `SE_Step`: advance one simulation step.
    Step,
    /// `SE_Close`: shut the engine down and end the session.
    Close,
    /// Any other name, including an empty or missing one.
    Unknown(String),
}

impl Verb {
    /// Maps a wire name onto a verb. Matching is exact.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "SE_Init" => Self::Init,
            "SE_ReportObjectPosXYH" => Self::ReportObjectPos,
            "SE_Step" => Self::Step,
            "SE_Close" => Self::Close,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Wire name of the verb.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Init => "SE_Init",
            Self::ReportObjectPos => "SE_ReportObjectPosXYH",
            Self::Step => "SE_Step",
            Self::Close => "SE_Close",
            Self::Unknown(name) => name,
        }
    }

    /// Returns `true` for the verb that ends the session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Close)
    }
}

/// Decoded command: a verb plus its raw `args` value.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRequest {
    verb: Verb,
    args: Value,
}

#[derive(Serialize)]
struct Envelope<'a> {
    function: &'a str,
    args: &'a Value,
}

impl CommandRequest {
    /// Builds a request from a verb and an argument bag.
    #[must_use]
    pub const fn new(verb: Verb, args: Map<String, Value>) -> Self {
        Self::with_raw_args(verb, Value::Object(args))
    }

    /// Builds a request whose `args` is sent exactly as given.
    #[must_use]
    pub const fn with_raw_args(verb: Verb, args: Value) -> Self {
        Self { verb, args }
    }

    /// Builds an `SE_Init` request.
    #[must_use]
    pub fn init(settings: &InitSettings) -> Self {
        let record = match &settings.record {
            RecordSetting::Flag(flag) => Value::from(*flag),
            RecordSetting::Path(path) => Value::from(path.as_str()),
        };
        let mut args = Map::new();
        args.insert("xosc_path".into(), Value::from(settings.scenario_path.as_str()));
        args.insert("disable_ctrls".into(), Value::from(settings.disable_ctrls));
        args.insert("use_viewer".into(), Value::from(settings.use_viewer));
        args.insert("threads".into(), Value::from(settings.threads));
        args.insert("record".into(), record);
        Self::new(Verb::Init, args)
    }

    /// Builds an `SE_ReportObjectPosXYH` request.
    #[must_use]
    pub fn report_pose(object_id: &str, pose: &ObjectPose) -> Self {
        let mut args = Map::new();
        args.insert("object_id".into(), Value::from(object_id));
        args.insert("timestamp".into(), Value::from(pose.timestamp));
        args.insert("x".into(), Value::from(pose.x));
        args.insert("y".into(), Value::from(pose.y));
        args.insert("h".into(), Value::from(pose.h));
        Self::new(Verb::ReportObjectPos, args)
    }

    /// Builds an `SE_Step` request.
    #[must_use]
    pub fn step() -> Self {
        Self::new(Verb::Step, Map::new())
    }

    /// Builds an `SE_Close` request.
    #[must_use]
    pub fn close() -> Self {
        Self::new(Verb::Close, Map::new())
    }

    /// Decodes a frame body.
    ///
    /// A missing or non-string `function` yields [`Verb::Unknown`] with an
    /// empty name; a missing or `null` `args` yields an empty bag. Any other
    /// `args` value is kept as sent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Decode`] when the body is not valid UTF-8
    /// JSON or is not an object.
    pub fn decode(body: &[u8]) -> Result<Self, DispatchError> {
        let text = std::str::from_utf8(body)
            .map_err(|error| DispatchError::malformed(format!("body is not UTF-8: {error}")))?;
        let document: Value = serde_json::from_str(text).map_err(DispatchError::from_json_error)?;
        let Value::Object(mut fields) = document else {
            return Err(DispatchError::malformed("top-level value must be an object"));
        };

        let verb = Verb::parse(
            fields
                .get("function")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        );
        let args = match fields.remove("args") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(args) => args,
        };
        Ok(Self { verb, args })
    }

    /// Encodes the request as a frame body.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Internal`] if serialisation fails.
    pub fn encode(&self) -> Result<Vec<u8>, DispatchError> {
        let envelope = Envelope {
            function: self.verb.as_str(),
            args: &self.args,
        };
        serde_json::to_vec(&envelope)
            .map_err(|error| DispatchError::internal(format!("failed to encode command: {error}")))
    }

    /// The decoded verb.
    #[must_use]
    pub const fn verb(&self) -> &Verb {
        &self.verb
    }

    /// Raw `args` value supplied with the command.
    #[must_use]
    pub const fn args(&self) -> &Value {
        &self.args
    }
}
