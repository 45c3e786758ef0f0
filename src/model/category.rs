use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub id_number: String,
    pub office: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryDto {
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}
