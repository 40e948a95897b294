//! Construction-time configuration for a gesture.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GestureConfig {
    /// Registered name; outward events are `<name>Start`, `<name>Change`, ...
    pub name: String,
    /// Minimum simultaneous touches needed to leave WAITING_FOR_TOUCHES.
    pub number_of_required_touches: usize,
    /// Discrete gestures skip POSSIBLE and CHANGED.
    pub is_discrete: bool,
    /// When false, beginning this gesture blocks gestures on other views.
    pub allows_simultaneous_recognition: bool,
    pub is_enabled: bool,
    /// Resolved once through the arbiter's delegate registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_name: Option<String>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            number_of_required_touches: 1,
            is_discrete: false,
            allows_simultaneous_recognition: true,
            is_enabled: true,
            delegate_name: None,
        }
    }
}

impl GestureConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn required_touches(mut self, n: usize) -> Self {
        self.number_of_required_touches = n;
        self
    }

    pub fn discrete(mut self) -> Self {
        self.is_discrete = true;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.allows_simultaneous_recognition = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn delegate(mut self, name: impl Into<String>) -> Self {
        self.delegate_name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GestureError::InvalidConfig("name is required".into()));
        }
        if self.number_of_required_touches == 0 {
            return Err(GestureError::InvalidConfig(format!(
                "`{}` needs at least one required touch",
                self.name
            )));
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
