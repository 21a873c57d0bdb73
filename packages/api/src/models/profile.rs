//! The upstream `/user` payload.
//!
//! Tahvel returns a large user-context object (roles, school flags, allowed file
//! types and so on). The body is kept verbatim so it can be passed through to the
//! page as `userData`. Only `student` and `school.id` drive further requests, and
//! both are read leniently: an id sent as a JSON string still counts, and a field
//! of any other shape is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteProfile(Value);

impl RemoteProfile {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn student_id(&self) -> Option<i64> {
        self.0.get("student").and_then(as_id)
    }

    /// `school.id`, or `fallback` when the profile carries none.
    pub fn school_id_or(&self, fallback: i64) -> i64 {
        self.0
            .pointer("/school/id")
            .and_then(as_id)
            .unwrap_or(fallback)
    }
}

impl From<Value> for RemoteProfile {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> RemoteProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reads_student_and_school() {
        let profile = profile(json!({"student": 42, "school": {"id": 7}}));
        assert_eq!(profile.student_id(), Some(42));
        assert_eq!(profile.school_id_or(38), 7);
    }

    #[test]
    fn test_school_falls_back() {
        let without_school = profile(json!({"student": 42, "school": null}));
        assert_eq!(without_school.school_id_or(38), 38);

        let teacher = profile(json!({"student": null, "teacher": 5}));
        assert_eq!(teacher.student_id(), None);
        assert_eq!(teacher.school_id_or(38), 38);
    }

    #[test]
    fn test_ids_sent_as_strings_are_accepted() {
        let profile = profile(json!({"student": "42", "school": {"id": " 7 "}}));
        assert_eq!(profile.student_id(), Some(42));
        assert_eq!(profile.school_id_or(38), 7);
    }

    #[test]
    fn test_odd_shapes_decode_and_read_as_absent() {
        let odd = profile(json!({"student": {"id": 42}, "school": "Tallinna Kool"}));
        assert_eq!(odd.student_id(), None);
        assert_eq!(odd.school_id_or(38), 38);

        let not_an_object = profile(json!(["ROLE_STUDENT"]));
        assert_eq!(not_an_object.student_id(), None);
        assert_eq!(not_an_object.as_value(), &json!(["ROLE_STUDENT"]));
    }

    #[test]
    fn test_body_survives_round_trip() {
        let upstream = json!({
            "name": "Mari Maasikas",
            "student": "42",
            "roleCode": "ROLL_T",
            "school": {"id": 7, "ehisSchool": "HTM", "higher": false},
            "authorizedRoles": ["ROLE_OIGUS_V_TEEMAOIGUS_OPPUR"]
        });

        let profile = profile(upstream.clone());
        assert_eq!(serde_json::to_value(&profile).unwrap(), upstream);
        assert_eq!(profile.into_value(), upstream);
    }
}
