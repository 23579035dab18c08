use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category a single user utterance is assigned to.
///
/// Covers both deployments: the keyword classifier emits the first five
/// labels plus `General`, the model classifier emits `SqlQuery`,
/// `ProceduralInfo`, `StatusCheck` and `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Which documents a named service requires.
    ServiceRequirements,
    /// Status of the citizen's own application or documents.
    CheckStatus,
    /// How to book an appointment.
    ScheduleAppointment,
    /// How to lodge a complaint.
    FileComplaint,
    /// Overview of the portal and what the assistant can do.
    GeneralInfo,
    /// Needs a database lookup (service details, departments, documents).
    SqlQuery,
    /// Processes, office hours, how-to guidance.
    ProceduralInfo,
    /// Application status check (requires authentication elsewhere).
    StatusCheck,
    /// Catch-all.
    General,
}

/// Returned when a label is not part of the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent label: {0:?}")]
pub struct UnknownIntent(pub String);

impl Intent {
    /// Every label, in declaration order.
    pub const ALL: [Intent; 9] = [
        Intent::ServiceRequirements,
        Intent::CheckStatus,
        Intent::ScheduleAppointment,
        Intent::FileComplaint,
        Intent::GeneralInfo,
        Intent::SqlQuery,
        Intent::ProceduralInfo,
        Intent::StatusCheck,
        Intent::General,
    ];

    /// Labels produced by the keyword classifier.
    pub const KEYWORD_LABELS: [Intent; 6] = [
        Intent::ServiceRequirements,
        Intent::CheckStatus,
        Intent::ScheduleAppointment,
        Intent::FileComplaint,
        Intent::GeneralInfo,
        Intent::General,
    ];

    /// Labels the model classifier accepts from the model.
    pub const MODEL_LABELS: [Intent; 4] = [
        Intent::SqlQuery,
        Intent::ProceduralInfo,
        Intent::StatusCheck,
        Intent::General,
    ];

    /// The catch-all label.
    pub const CATCH_ALL: Intent = Intent::General;

    pub fn label(self) -> &'static str {
        match self {
            Intent::ServiceRequirements => "service_requirements",
            Intent::CheckStatus => "check_status",
            Intent::ScheduleAppointment => "schedule_appointment",
            Intent::FileComplaint => "file_complaint",
            Intent::GeneralInfo => "general_info",
            Intent::SqlQuery => "sql_query",
            Intent::ProceduralInfo => "procedural_info",
            Intent::StatusCheck => "status_check",
            Intent::General => "general",
        }
    }

    pub fn is_catch_all(self) -> bool {
        self == Self::CATCH_ALL
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    /// Exact, case-sensitive match against the wire labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.label() == s)
            .ok_or_else(|| UnknownIntent(s.to_string()))
    }
}
