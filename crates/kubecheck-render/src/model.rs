#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Warn,
    Error,
}

impl RenderableSeverity {
    pub fn label(self) -> &'static str {
        match self {
            RenderableSeverity::Warn => "WARN",
            RenderableSeverity::Error => "ERROR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableLevel {
    Ok,
    Warn,
    Error,
}

impl RenderableLevel {
    pub fn label(self) -> &'static str {
        match self {
            RenderableLevel::Ok => "OK",
            RenderableLevel::Warn => "WARN",
            RenderableLevel::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableViolation {
    pub severity: RenderableSeverity,
    pub rule: String,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDocument {
    pub source: String,
    pub index: u32,
    /// `Kind/name`, or just the kind.
    pub label: String,
    pub level: RenderableLevel,
    pub violations: Vec<RenderableViolation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSkipped {
    pub source: String,
    pub reason: String,
    pub detail: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableSummary {
    pub files_scanned: u32,
    pub documents_scanned: u32,
    pub documents_ok: u32,
    pub documents_warn: u32,
    pub documents_error: u32,
    pub violations_total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableLevel,
    pub exit_code: i32,
    pub documents: Vec<RenderableDocument>,
    pub skipped: Vec<RenderableSkipped>,
    pub summary: RenderableSummary,
}
