use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobApplicationId(pub Uuid);

impl JobApplicationId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for JobApplicationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(JobApplicationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Отклик на вакансию
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(flatten)]
    pub base: BaseAggregate<JobApplicationId>,

    #[serde(rename = "applicantName", default)]
    pub applicant_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub position: String,

    /// Дата отклика, ISO "yyyy-mm-dd"
    #[serde(rename = "appliedAt", default)]
    pub applied_at: String,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "resumeUrl")]
    pub resume_url: Option<String>,
}

impl JobApplication {
    pub fn new_for_insert(dto: &JobApplicationDto) -> Self {
        let mut base = BaseAggregate::new(
            JobApplicationId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            applicant_name: dto.applicant_name.clone(),
            email: dto.email.clone(),
            position: dto.position.clone(),
            applied_at: dto.applied_at.clone(),
            status: dto.status.clone(),
            resume_url: dto.resume_url.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &JobApplicationDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.applicant_name = dto.applicant_name.clone();
        self.email = dto.email.clone();
        self.position = dto.position.clone();
        self.applied_at = dto.applied_at.clone();
        self.status = dto.status.clone();
        self.resume_url = dto.resume_url.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for JobApplication {
    type Id = JobApplicationId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "job_applications"
    }

    fn element_name() -> &'static str {
        "Отклик"
    }

    fn list_name() -> &'static str {
        "Отклики на вакансии"
    }
}

impl ListRecord for JobApplication {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.applicant_name.clone(),
            self.email.clone(),
            self.position.clone(),
            self.status.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "applicant_name" => Some(FieldValue::Text(self.applicant_name.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "position" => Some(FieldValue::Text(self.position.clone())),
            "applied_at" => Some(FieldValue::Date(self.applied_at.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobApplicationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "applicantName", default)]
    pub applicant_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(rename = "appliedAt", default)]
    pub applied_at: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "resumeUrl")]
    pub resume_url: Option<String>,
    pub comment: Option<String>,
}

pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("applicant_name", "Соискатель", ValidationRules::required()),
    FieldRule::new("position", "Вакансия", ValidationRules::required()),
    FieldRule::new(
        "email",
        "Email",
        ValidationRules {
            required: true,
            min_length: Some(5),
            ..ValidationRules::none()
        },
    ),
];
