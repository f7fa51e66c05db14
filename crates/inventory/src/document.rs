//! Persisted shape of a product's variant matrix.

use serde::{Deserialize, Serialize};

use crate::dimension::SpecificationSet;
use crate::reconcile::{MatrixShape, ReconcileReport, matrix_shape, reconcile_product_with_report};
use crate::stock::WarehouseInventory;

/// `{ specifications: [{name, values}], warehouses: [{location, inventory}] }`.
///
/// Consumers must special-case the `default` inventory key, which is the only
/// key present when the product has no variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub specifications: SpecificationSet,
    #[serde(default)]
    pub warehouses: Vec<WarehouseInventory>,
}

impl ProductDocument {
    pub fn shape(&self) -> MatrixShape {
        matrix_shape(&self.specifications)
    }

    /// Bring every warehouse in line with the specifications.
    pub fn reconcile(self) -> (ProductDocument, Vec<ReconcileReport>) {
        let ProductDocument {
            specifications,
            warehouses,
        } = self;

        let (warehouses, reports) = reconcile_product_with_report(&specifications, warehouses)
            .into_iter()
            .unzip();

        (
            ProductDocument {
                specifications,
                warehouses,
            },
            reports,
        )
    }
}
