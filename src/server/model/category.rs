//! Roster entry domain models and parameters.

use crate::{
    model::category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    server::error::AppError,
};

/// A bookable office with its contact email and department tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub id_number: String,
    pub office: String,
    pub email: String,
    pub department: String,
}

impl Category {
    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            id_number: self.id_number,
            office: self.office,
            email: self.email,
            department: self.department,
        }
    }

    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            id_number: entity.id_number,
            office: entity.office,
            email: entity.email,
            department: entity.department,
        }
    }
}

/// Parameters for creating or replacing a roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryParams {
    pub id_number: String,
    pub office: String,
    pub email: String,
    pub department: String,
}

impl CategoryParams {
    pub fn from_create_dto(dto: CreateCategoryDto) -> Result<Self, AppError> {
        Self::new(dto.id_number, dto.office, dto.email, dto.department)
    }

    pub fn from_update_dto(dto: UpdateCategoryDto) -> Result<Self, AppError> {
        Self::new(dto.id_number, dto.office, dto.email, dto.department)
    }

    fn new(
        id_number: String,
        office: String,
        email: String,
        department: String,
    ) -> Result<Self, AppError> {
        let params = Self {
            id_number: id_number.trim().to_string(),
            office: office.trim().to_string(),
            email: email.trim().to_string(),
            department: department.trim().to_string(),
        };

        if params.id_number.is_empty()
            || params.office.is_empty()
            || params.email.is_empty()
            || params.department.is_empty()
        {
            return Err(AppError::BadRequest("All fields are required.".to_string()));
        }

        Ok(params)
    }
}
