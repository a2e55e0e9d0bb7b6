use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinentId(pub Uuid);

impl ContinentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for ContinentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContinentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Справочник континентов. `description` — название.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    #[serde(flatten)]
    pub base: BaseAggregate<ContinentId>,

    #[serde(rename = "isoCode", default)]
    pub iso_code: String,

    #[serde(rename = "countryCount", default)]
    pub country_count: i32,
}

impl Continent {
    pub fn new_for_insert(dto: &ContinentDto) -> Self {
        let mut base = BaseAggregate::new(
            ContinentId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            iso_code: dto.iso_code.clone(),
            country_count: dto.country_count.unwrap_or(0),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ContinentDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.iso_code = dto.iso_code.clone();
        if let Some(count) = dto.country_count {
            self.country_count = count;
        }
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Continent {
    type Id = ContinentId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "continents"
    }

    fn element_name() -> &'static str {
        "Континент"
    }

    fn list_name() -> &'static str {
        "Континенты"
    }
}

impl ListRecord for Continent {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.iso_code.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "iso_code" => Some(FieldValue::Text(self.iso_code.clone())),
            "country_count" => Some(FieldValue::Number(f64::from(self.country_count))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContinentDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "isoCode", default)]
    pub iso_code: String,
    #[serde(rename = "countryCount")]
    pub country_count: Option<i32>,
    pub comment: Option<String>,
}

pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Название", ValidationRules::required()),
    FieldRule::new(
        "iso_code",
        "Код ISO",
        ValidationRules {
            required: true,
            min_length: Some(2),
            max_length: Some(2),
            ..ValidationRules::none()
        },
    ),
];
