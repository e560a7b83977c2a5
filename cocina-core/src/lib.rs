pub mod actor;
pub mod dates;
pub mod error;
pub mod memory;
pub mod menu;
pub mod report;
pub mod schedule;
pub mod store;
pub mod wire;

pub use actor::Actor;
pub use error::{MenuError, ReportError, ValidationError};
pub use memory::InMemoryStore;
pub use menu::{create_menu, validate_menu, MenuPayload, MenuRecipeEntry, ValidatedMenu};
pub use report::{
    aggregate_purchase_report, parse_report_request, LineItem, PurchaseReport, ReportLine,
    ReportRequestEntry,
};
pub use schedule::{validate_schedule, Schedule};
pub use store::{
    CatalogIngredient, CatalogRecipe, MenuLine, MenuStore, NewMenu, RecipeCatalog, RecipeLine,
    ScheduledMenu,
};
pub use wire::WireNumber;
