#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct AttributeValueRecord {
    pub id: String,
    pub attribute: String,
    pub name: String,
    pub value: String,
    pub slug: String,
}

#[derive(Clone)]
pub struct AttributeValueNode(pub AttributeValueRecord);

impl From<AttributeValueRecord> for AttributeValueNode {
    fn from(record: AttributeValueRecord) -> Self {
        AttributeValueNode(record)
    }
}

/// A value that passed cleaning and is ready to be stored under an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedValue {
    pub name: String,
    pub value: String,
    pub slug: String,
}
