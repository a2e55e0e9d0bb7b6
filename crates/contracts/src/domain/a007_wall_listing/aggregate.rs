use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallListingId(pub Uuid);

impl WallListingId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for WallListingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WallListingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Объявление на "стене" (доске предложений). `description` — заголовок.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallListing {
    #[serde(flatten)]
    pub base: BaseAggregate<WallListingId>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub status: String,

    /// Дата публикации, ISO
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

impl WallListing {
    pub fn new_for_insert(dto: &WallListingDto) -> Self {
        let mut base = BaseAggregate::new(
            WallListingId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            category: dto.category.clone(),
            price: dto.price.unwrap_or(0.0),
            currency: dto.currency.clone().unwrap_or_default(),
            city: dto.city.clone().unwrap_or_default(),
            status: dto.status.clone(),
            published_at: dto.published_at.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &WallListingDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone();
        if let Some(price) = dto.price {
            self.price = price;
        }
        self.currency = dto.currency.clone().unwrap_or_default();
        self.city = dto.city.clone().unwrap_or_default();
        self.status = dto.status.clone();
        self.published_at = dto.published_at.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for WallListing {
    type Id = WallListingId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "wall_listings"
    }

    fn element_name() -> &'static str {
        "Объявление"
    }

    fn list_name() -> &'static str {
        "Объявления"
    }
}

impl ListRecord for WallListing {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.category.clone(),
            self.city.clone(),
            self.status.clone(),
            self.currency.clone(),
        ]
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "category" => Some(FieldValue::Text(self.category.clone())),
            "price" => Some(FieldValue::Number(self.price)),
            "currency" => Some(FieldValue::Text(self.currency.clone())),
            "city" => Some(FieldValue::Text(self.city.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "published_at" => self.published_at.clone().map(FieldValue::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WallListingDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub comment: Option<String>,
}

pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Заголовок", ValidationRules::required()),
    FieldRule::new("category", "Категория", ValidationRules::required()),
    FieldRule::new("price", "Цена", ValidationRules::none().with_min(0.0)),
];
