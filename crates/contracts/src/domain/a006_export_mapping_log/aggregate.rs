use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportMappingLogId(pub Uuid);

impl ExportMappingLogId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
}

impl AggregateId for ExportMappingLogId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ExportMappingLogId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Журнал выгрузок: одна запись — одна выполненная выгрузка маппинга.
/// Записи создаёт сервер, консоль их только читает и удаляет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMappingLog {
    #[serde(flatten)]
    pub base: BaseAggregate<ExportMappingLogId>,

    /// Момент выгрузки, ISO datetime
    #[serde(rename = "exportedAt", default)]
    pub exported_at: String,

    /// Какой ресурс выгружали ("inquiries", "partners", ...)
    #[serde(default)]
    pub resource: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    #[serde(rename = "rowCount", default)]
    pub row_count: i64,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "exportedBy", default)]
    pub exported_by: String,
}

impl ExportMappingLog {
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }
}

impl AggregateRoot for ExportMappingLog {
    type Id = ExportMappingLogId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "export_mapping_logs"
    }

    fn element_name() -> &'static str {
        "Запись журнала выгрузок"
    }

    fn list_name() -> &'static str {
        "Журнал выгрузок"
    }
}

impl ListRecord for ExportMappingLog {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.resource.clone(),
            self.file_name.clone(),
            self.status.clone(),
            self.exported_by.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "exported_at" => Some(FieldValue::Date(self.exported_at.clone())),
            "resource" => Some(FieldValue::Text(self.resource.clone())),
            "file_name" => Some(FieldValue::Text(self.file_name.clone())),
            "row_count" => Some(FieldValue::Number(self.row_count as f64)),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "exported_by" => Some(FieldValue::Text(self.exported_by.clone())),
            _ => None,
        }
    }
}
