use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::list_query::{FieldValue, ListRecord};
use crate::shared::metadata::{FieldRule, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlogId(pub Uuid);

impl BlogId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for BlogId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BlogId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Публикация блога. `description` — заголовок статьи.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(flatten)]
    pub base: BaseAggregate<BlogId>,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub status: String,

    /// Дата публикации, ISO
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    /// Теги статьи — фильтруются по принципу "хотя бы один из выбранных"
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Blog {
    pub fn new_for_insert(dto: &BlogDto) -> Self {
        let mut base = BaseAggregate::new(
            BlogId::new_v4(),
            dto.code.clone().unwrap_or_default(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();

        Self {
            base,
            author: dto.author.clone(),
            status: dto.status.clone(),
            published_at: dto.published_at.clone(),
            tags: dto.tags.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &BlogDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.author = dto.author.clone();
        self.status = dto.status.clone();
        self.published_at = dto.published_at.clone();
        self.tags = dto.tags.clone();
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Blog {
    type Id = BlogId;

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
        "a009"
    }

    fn collection_name() -> &'static str {
        "blogs"
    }

    fn element_name() -> &'static str {
        "Статья"
    }

    fn list_name() -> &'static str {
        "Блог"
    }
}

impl ListRecord for Blog {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.author.clone(),
            self.status.clone(),
        ];
        fields.extend(self.tags.iter().cloned());
        fields
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "code" => Some(FieldValue::Text(self.base.code.clone())),
            "description" => Some(FieldValue::Text(self.base.description.clone())),
            "author" => Some(FieldValue::Text(self.author.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "published_at" => self.published_at.clone().map(FieldValue::Date),
            "tags" => Some(FieldValue::TextList(self.tags.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlogDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub comment: Option<String>,
}

pub const FORM_RULES: &[FieldRule] = &[
    FieldRule::new("description", "Заголовок", ValidationRules::required()),
    FieldRule::new("author", "Автор", ValidationRules::required()),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_searchable_and_filterable() {
        let mut dto = BlogDto::default();
        dto.description = "Релиз 2.0".into();
        dto.author = "team".into();
        dto.tags = vec!["release".into(), "crm".into()];
        let blog = Blog::new_for_insert(&dto);

        assert!(blog.search_fields().contains(&"crm".to_string()));
        assert_eq!(
            blog.field("tags"),
            Some(FieldValue::TextList(vec!["release".into(), "crm".into()]))
        );
    }
}
