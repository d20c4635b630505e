use serde::{Deserialize, Serialize};

/// Provider-reported lifecycle state of an instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Stopped,
    Running,
    Unknown,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Stopped => "stopped",
            InstanceState::Running => "running",
            InstanceState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instance as seen through the listing capability. The provider owns
/// the state; we only read identifiers and request transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceRef {
    pub id: String,
    pub state: InstanceState,
}

impl InstanceRef {
    pub fn new(id: impl Into<String>, state: InstanceState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// One term of a conjunction listing filter: `field` must take one of
/// `values`. Tag terms use the `tag:<key>` field convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterTerm {
    pub field: String,
    pub values: Vec<String>,
}

impl FilterTerm {
    pub fn new(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            values,
        }
    }

    pub fn tag(key: &str, value: impl Into<String>) -> Self {
        Self::new(format!("tag:{key}"), vec![value.into()])
    }

    pub fn state(state: InstanceState) -> Self {
        Self::new("instance-state-name", vec![state.as_str().to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_term_constructors() {
        let t = FilterTerm::tag("scheduled_on", "07");
        assert_eq!(t.field, "tag:scheduled_on");
        assert_eq!(t.values, vec!["07".to_string()]);

        let s = FilterTerm::state(InstanceState::Stopped);
        assert_eq!(s.field, "instance-state-name");
        assert_eq!(s.values, vec!["stopped".to_string()]);
    }
}
