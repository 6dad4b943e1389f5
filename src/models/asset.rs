//! Asset parameter types: listing filters, creation and updates.

use super::common::{require_id, require_one_based, require_text};
use crate::error::JitbitError;
use crate::query::{Form, Query};

/// Filters for `Assets`. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct AssetListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Only assets assigned to this user.
    pub assigned_to_user_id: Option<u64>,
    /// Only assets assigned to this company.
    pub assigned_to_company_id: Option<u64>,
    /// Only assets assigned to this department.
    pub assigned_to_department_id: Option<u64>,
}

impl AssetListParams {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Filters by assigned user.
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.assigned_to_user_id = Some(user_id);
        self
    }

    /// Filters by assigned company.
    pub fn with_company(mut self, company_id: u64) -> Self {
        self.assigned_to_company_id = Some(company_id);
        self
    }

    /// Filters by assigned department.
    pub fn with_department(mut self, department_id: u64) -> Self {
        self.assigned_to_department_id = Some(department_id);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        if let Some(page) = self.page {
            require_one_based(page, "page")?;
        }
        for (id, name) in [
            (self.assigned_to_user_id, "assigned_to_user_id"),
            (self.assigned_to_company_id, "assigned_to_company_id"),
            (self.assigned_to_department_id, "assigned_to_department_id"),
        ] {
            if let Some(id) = id {
                require_id(id, name)?;
            }
        }
        Ok(())
    }

    pub(crate) fn to_path(&self) -> String {
        Query::new("Assets")
            .opt("page", self.page)
            .opt("assignedToUserId", self.assigned_to_user_id)
            .opt("assignedToCompanyId", self.assigned_to_company_id)
            .opt("assignedToDepartmentId", self.assigned_to_department_id)
            .build()
    }
}

/// An asset to create.
#[derive(Debug, Clone, Default)]
pub struct NewAsset {
    /// Model name, e.g. "Latitude 7440".
    pub model_name: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Asset type, e.g. "Laptop".
    pub asset_type: String,
    /// Supplier.
    pub supplier: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Free-form comments.
    pub comments: Option<String>,
    /// Number of units.
    pub quantity: Option<u32>,
    /// Owning company.
    pub company_id: Option<u64>,
    /// Owning department.
    pub department_id: Option<u64>,
}

impl NewAsset {
    /// Creates an asset with the three required fields.
    pub fn new(
        model_name: impl Into<String>,
        manufacturer: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            manufacturer: manufacturer.into(),
            asset_type: asset_type.into(),
            ..Self::default()
        }
    }

    /// Sets the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Sets the serial number.
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the comments.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Assigns the asset to a company.
    pub fn with_company(mut self, company_id: u64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Assigns the asset to a department.
    pub fn with_department(mut self, department_id: u64) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_text(&self.model_name, "model_name")?;
        require_text(&self.manufacturer, "manufacturer")?;
        require_text(&self.asset_type, "asset_type")?;
        validate_owner(self.company_id, self.department_id)
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("modelName", &self.model_name)
            .field("manufacturer", &self.manufacturer)
            .field("type", &self.asset_type)
            .opt("supplier", self.supplier.as_deref())
            .opt("serialNumber", self.serial_number.as_deref())
            .opt("location", self.location.as_deref())
            .opt("comments", self.comments.as_deref())
            .opt("quantity", self.quantity)
            .opt("companyId", self.company_id)
            .opt("departmentId", self.department_id)
    }
}

/// Partial update of an existing asset. Fields left `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct AssetUpdate {
    /// Asset to update.
    pub id: u64,
    /// New model name.
    pub model_name: Option<String>,
    /// New manufacturer.
    pub manufacturer: Option<String>,
    /// New asset type.
    pub asset_type: Option<String>,
    /// New supplier.
    pub supplier: Option<String>,
    /// New serial number.
    pub serial_number: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New comments.
    pub comments: Option<String>,
    /// New quantity.
    pub quantity: Option<u32>,
    /// New owning company.
    pub company_id: Option<u64>,
    /// New owning department.
    pub department_id: Option<u64>,
}

impl AssetUpdate {
    /// Starts an update for the given asset.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Changes the model name.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Changes the manufacturer.
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Changes the asset type.
    pub fn with_asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }

    /// Changes the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Changes the serial number.
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Changes the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Replaces the comments.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Changes the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Moves the asset to another company.
    pub fn with_company(mut self, company_id: u64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Moves the asset to another department.
    pub fn with_department(mut self, department_id: u64) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_id(self.id, "asset id")?;
        for (value, name) in [
            (&self.model_name, "model_name"),
            (&self.manufacturer, "manufacturer"),
            (&self.asset_type, "asset_type"),
        ] {
            if let Some(value) = value {
                require_text(value, name)?;
            }
        }
        validate_owner(self.company_id, self.department_id)?;
        if self.to_form().len() <= 1 {
            return Err(JitbitError::validation(
                "asset update must change at least one field",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("id", self.id)
            .opt("modelName", self.model_name.as_deref())
            .opt("manufacturer", self.manufacturer.as_deref())
            .opt("type", self.asset_type.as_deref())
            .opt("supplier", self.supplier.as_deref())
            .opt("serialNumber", self.serial_number.as_deref())
            .opt("location", self.location.as_deref())
            .opt("comments", self.comments.as_deref())
            .opt("quantity", self.quantity)
            .opt("companyId", self.company_id)
            .opt("departmentId", self.department_id)
    }
}

fn validate_owner(company_id: Option<u64>, department_id: Option<u64>) -> Result<(), JitbitError> {
    if let Some(id) = company_id {
        require_id(id, "company_id")?;
    }
    if let Some(id) = department_id {
        require_id(id, "department_id")?;
    }
    Ok(())
}
