use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BugReportId(pub Uuid);

impl BugReportId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for BugReportId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BugReportId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Сообщение об ошибке от пользователей консоли. `description` —
/// заголовок бага.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugReport {
    #[serde(flatten)]
    pub base: BaseAggregate<BugReportId>,

    /// Модуль консоли, где замечена ошибка
    #[serde(default)]
    pub module: String,

    #[serde(default)]
    pub severity: String,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "reportedBy", default)]
    pub reported_by: String,

    /// Дата регистрации, ISO
    #[serde(rename = "reportedAt", default)]
    pub reported_at: String,
}

impl BugReport {
    pub fn new_for_insert(dto: &BugReportDto) -> Self {
        let mut base = BaseAggregate::new(
            BugReportId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            module: dto.module.clone(),
            severity: dto.severity.clone(),
            status: dto.status.clone(),
            reported_by: dto.reported_by.clone(),
            reported_at: dto.reported_at.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &BugReportDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.module = dto.module.clone();
        self.severity = dto.severity.clone();
        self.status = dto.status.clone();
        self.reported_by = dto.reported_by.clone();
        self.reported_at = dto.reported_at.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for BugReport {
    type Id = BugReportId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "bug_reports"
    }

    fn element_name() -> &'static str {
        "Баг-репорт"
    }

    fn list_name() -> &'static str {
        "Баг-репорты"
    }
}

impl ListRecord for BugReport {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.module.clone(),
            self.severity.clone(),
            self.status.clone(),
            self.reported_by.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "module" => Some(FieldValue::Text(self.module.clone())),
            "severity" => Some(FieldValue::Text(self.severity.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "reported_by" => Some(FieldValue::Text(self.reported_by.clone())),
            "reported_at" => Some(FieldValue::Date(self.reported_at.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BugReportDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "reportedBy", default)]
    pub reported_by: String,
    #[serde(rename = "reportedAt", default)]
    pub reported_at: String,
    pub comment: Option<String>,
}

pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Заголовок", ValidationRules::required()),
    FieldRule::new("module", "Модуль", ValidationRules::required()),
    FieldRule::new("reported_by", "Автор", ValidationRules::required()),
];
