use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use varistock_core::{Aggregate, AggregateRoot, DomainError, Entity, Event, ProductId};
use varistock_inventory::{
    Dimension, MatrixShape, ProductDocument, SpecificationSet, StockField, WarehouseInventory,
    matrix_shape, reconcile_product_with_report, reconcile_warehouse,
};

/// Aggregate root: Product.
///
/// Invariant: after every applied event, each warehouse holds exactly the
/// keys derivable from `specifications`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    specifications: SpecificationSet,
    warehouses: Vec<WarehouseInventory>,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            specifications: SpecificationSet::new(),
            warehouses: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specifications(&self) -> &SpecificationSet {
        &self.specifications
    }

    pub fn warehouses(&self) -> &[WarehouseInventory] {
        &self.warehouses
    }

    pub fn warehouse(&self, location: &str) -> Option<&WarehouseInventory> {
        self.warehouses.iter().find(|w| w.id() == location)
    }

    pub fn matrix_shape(&self) -> MatrixShape {
        matrix_shape(&self.specifications)
    }

    /// Counter for one variant in one warehouse; unknown locations or keys read as 0.
    pub fn stock(&self, location: &str, key: &str, field: StockField) -> u64 {
        self.warehouse(location).map_or(0, |w| w.get(key, field))
    }

    /// Snapshot in the persisted `{specifications, warehouses}` shape.
    pub fn document(&self) -> ProductDocument {
        ProductDocument {
            specifications: self.specifications.clone(),
            warehouses: self.warehouses.clone(),
        }
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddDimension (appended after the existing dimensions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDimension {
    pub product_id: ProductId,
    pub name: String,
    pub values: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveDimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDimension {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddDimensionValue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDimensionValue {
    pub product_id: ProductId,
    pub dimension: String,
    pub value: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveDimensionValue (every occurrence of the value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDimensionValue {
    pub product_id: ProductId,
    pub dimension: String,
    pub value: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddWarehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddWarehouse {
    pub product_id: ProductId,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveWarehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveWarehouse {
    pub product_id: ProductId,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetStock. `key` must belong to the current key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStock {
    pub product_id: ProductId,
    pub location: String,
    pub key: String,
    pub field: StockField,
    pub value: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    AddDimension(AddDimension),
    RemoveDimension(RemoveDimension),
    AddDimensionValue(AddDimensionValue),
    RemoveDimensionValue(RemoveDimensionValue),
    AddWarehouse(AddWarehouse),
    RemoveWarehouse(RemoveWarehouse),
    SetStock(SetStock),
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DimensionAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionAdded {
    pub product_id: ProductId,
    pub dimension: Dimension,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DimensionRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRemoved {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DimensionValueAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValueAdded {
    pub product_id: ProductId,
    pub dimension: String,
    pub value: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DimensionValueRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValueRemoved {
    pub product_id: ProductId,
    pub dimension: String,
    pub value: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: WarehouseAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseAdded {
    pub product_id: ProductId,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: WarehouseRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseRemoved {
    pub product_id: ProductId,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockSet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSet {
    pub product_id: ProductId,
    pub location: String,
    pub key: String,
    pub field: StockField,
    pub value: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    DimensionAdded(DimensionAdded),
    DimensionRemoved(DimensionRemoved),
    DimensionValueAdded(DimensionValueAdded),
    DimensionValueRemoved(DimensionValueRemoved),
    WarehouseAdded(WarehouseAdded),
    WarehouseRemoved(WarehouseRemoved),
    StockSet(StockSet),
}

impl ProductEvent {
    /// Events that change the specification set and therefore the key set.
    pub fn changes_specifications(&self) -> bool {
        matches!(
            self,
            ProductEvent::DimensionAdded(_)
                | ProductEvent::DimensionRemoved(_)
                | ProductEvent::DimensionValueAdded(_)
                | ProductEvent::DimensionValueRemoved(_)
        )
    }
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "products.product.created",
            ProductEvent::DimensionAdded(_) => "products.dimension.added",
            ProductEvent::DimensionRemoved(_) => "products.dimension.removed",
            ProductEvent::DimensionValueAdded(_) => "products.dimension.value_added",
            ProductEvent::DimensionValueRemoved(_) => "products.dimension.value_removed",
            ProductEvent::WarehouseAdded(_) => "products.warehouse.added",
            ProductEvent::WarehouseRemoved(_) => "products.warehouse.removed",
            ProductEvent::StockSet(_) => "products.stock.set",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::DimensionAdded(e) => e.occurred_at,
            ProductEvent::DimensionRemoved(e) => e.occurred_at,
            ProductEvent::DimensionValueAdded(e) => e.occurred_at,
            ProductEvent::DimensionValueRemoved(e) => e.occurred_at,
            ProductEvent::WarehouseAdded(e) => e.occurred_at,
            ProductEvent::WarehouseRemoved(e) => e.occurred_at,
            ProductEvent::StockSet(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.name = e.name.clone();
                self.specifications = SpecificationSet::new();
                self.warehouses.clear();
                self.created = true;
            }
            ProductEvent::DimensionAdded(e) => {
                self.specifications.push(e.dimension.clone());
            }
            ProductEvent::DimensionRemoved(e) => {
                self.specifications.remove(&e.name);
            }
            ProductEvent::DimensionValueAdded(e) => {
                if let Some(d) = self.specifications.get_mut(&e.dimension) {
                    d.values.push(e.value.clone());
                }
            }
            ProductEvent::DimensionValueRemoved(e) => {
                if let Some(d) = self.specifications.get_mut(&e.dimension) {
                    d.values.retain(|v| *v != e.value);
                }
            }
            ProductEvent::WarehouseAdded(e) => {
                let warehouse =
                    reconcile_warehouse(&self.specifications, WarehouseInventory::new(&e.location));
                self.warehouses.push(warehouse);
            }
            ProductEvent::WarehouseRemoved(e) => {
                self.warehouses.retain(|w| w.id() != e.location);
            }
            ProductEvent::StockSet(e) => {
                if let Some(w) = self.warehouses.iter_mut().find(|w| w.id() == e.location) {
                    w.set(&e.key, e.field, e.value);
                }
            }
        }

        if event.changes_specifications() {
            self.reconcile_warehouses();
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::AddDimension(cmd) => self.handle_add_dimension(cmd),
            ProductCommand::RemoveDimension(cmd) => self.handle_remove_dimension(cmd),
            ProductCommand::AddDimensionValue(cmd) => self.handle_add_value(cmd),
            ProductCommand::RemoveDimensionValue(cmd) => self.handle_remove_value(cmd),
            ProductCommand::AddWarehouse(cmd) => self.handle_add_warehouse(cmd),
            ProductCommand::RemoveWarehouse(cmd) => self.handle_remove_warehouse(cmd),
            ProductCommand::SetStock(cmd) => self.handle_set_stock(cmd),
        }
    }
}

impl Product {
    /// Explicit reconciliation after a specification change.
    fn reconcile_warehouses(&mut self) {
        let warehouses = std::mem::take(&mut self.warehouses);
        let shape = self.matrix_shape();
        let reconciled = reconcile_product_with_report(&self.specifications, warehouses);

        if let MatrixShape::Exhausted { dimension } = &shape {
            tracing::warn!(
                product_id = %self.id,
                dimension = %dimension,
                "dimension has no values; all variants collapsed to the default key"
            );
        }

        self.warehouses = reconciled
            .into_iter()
            .map(|(warehouse, report)| {
                if report.changed() {
                    tracing::debug!(
                        product_id = %self.id,
                        location = %warehouse.location,
                        added = report.added,
                        dropped = report.dropped,
                        "warehouse key set changed"
                    );
                }
                warehouse
            })
            .collect();
    }

    fn ensure_created(&self) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found(format!("product {}", self.id)));
        }
        Ok(())
    }

    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        self.ensure_created()?;
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn dimension(&self, name: &str) -> Result<&Dimension, DomainError> {
        self.specifications
            .get(name)
            .ok_or_else(|| DomainError::not_found(format!("dimension '{name}'")))
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            product_id: cmd.product_id,
            name: cmd.name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_dimension(&self, cmd: &AddDimension) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("dimension name cannot be empty"));
        }
        if self.specifications.get(&cmd.name).is_some() {
            return Err(DomainError::validation(format!(
                "dimension '{}' already exists",
                cmd.name
            )));
        }
        for (i, value) in cmd.values.iter().enumerate() {
            if value.is_empty() {
                return Err(DomainError::validation("value cannot be empty"));
            }
            if cmd.values[..i].contains(value) {
                return Err(DomainError::conflict(format!(
                    "value '{}' listed twice in '{}'",
                    value, cmd.name
                )));
            }
        }

        Ok(vec![ProductEvent::DimensionAdded(DimensionAdded {
            product_id: cmd.product_id,
            dimension: Dimension::new(cmd.name.clone(), cmd.values.iter().cloned()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_dimension(
        &self,
        cmd: &RemoveDimension,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;
        self.dimension(&cmd.name)?;

        Ok(vec![ProductEvent::DimensionRemoved(DimensionRemoved {
            product_id: cmd.product_id,
            name: cmd.name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_value(&self, cmd: &AddDimensionValue) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;
        let dimension = self.dimension(&cmd.dimension)?;

        if cmd.value.is_empty() {
            return Err(DomainError::validation("value cannot be empty"));
        }
        if dimension.contains_value(&cmd.value) {
            return Err(DomainError::conflict(format!(
                "value '{}' already present in '{}'",
                cmd.value, cmd.dimension
            )));
        }

        Ok(vec![ProductEvent::DimensionValueAdded(DimensionValueAdded {
            product_id: cmd.product_id,
            dimension: cmd.dimension.clone(),
            value: cmd.value.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_value(
        &self,
        cmd: &RemoveDimensionValue,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;
        let dimension = self.dimension(&cmd.dimension)?;

        if !dimension.contains_value(&cmd.value) {
            return Err(DomainError::not_found(format!(
                "value '{}' in '{}'",
                cmd.value, cmd.dimension
            )));
        }

        Ok(vec![ProductEvent::DimensionValueRemoved(DimensionValueRemoved {
            product_id: cmd.product_id,
            dimension: cmd.dimension.clone(),
            value: cmd.value.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_warehouse(&self, cmd: &AddWarehouse) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;

        if cmd.location.trim().is_empty() {
            return Err(DomainError::validation("warehouse location cannot be empty"));
        }
        if self.warehouse(&cmd.location).is_some() {
            return Err(DomainError::conflict(format!(
                "warehouse '{}' already exists",
                cmd.location
            )));
        }

        Ok(vec![ProductEvent::WarehouseAdded(WarehouseAdded {
            product_id: cmd.product_id,
            location: cmd.location.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_warehouse(
        &self,
        cmd: &RemoveWarehouse,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;

        if self.warehouse(&cmd.location).is_none() {
            return Err(DomainError::not_found(format!("warehouse '{}'", cmd.location)));
        }

        Ok(vec![ProductEvent::WarehouseRemoved(WarehouseRemoved {
            product_id: cmd.product_id,
            location: cmd.location.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_stock(&self, cmd: &SetStock) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_product_id(cmd.product_id)?;

        let warehouse = self
            .warehouse(&cmd.location)
            .ok_or_else(|| DomainError::not_found(format!("warehouse '{}'", cmd.location)))?;

        // Reconciled warehouses hold exactly the valid keys.
        if warehouse.record(&cmd.key).is_none() {
            return Err(DomainError::not_found(format!("variant '{}'", cmd.key)));
        }

        Ok(vec![ProductEvent::StockSet(StockSet {
            product_id: cmd.product_id,
            location: cmd.location.clone(),
            key: cmd.key.clone(),
            field: cmd.field,
            value: cmd.value,
            occurred_at: cmd.occurred_at,
        })])
    }
}
