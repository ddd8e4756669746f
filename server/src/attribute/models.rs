#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct AttributeRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Clone)]
pub struct AttributeNode(pub AttributeRecord);

impl From<AttributeRecord> for AttributeNode {
    fn from(record: AttributeRecord) -> Self {
        AttributeNode(record)
    }
}
