use thiserror::Error;

/// Reasons a menu request is rejected.
///
/// The `Display` text is the message returned to API clients, so it stays in
/// the language the front end shows to restaurant staff.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Datos inválidos")]
    InvalidPayload,

    #[error("Nombre inválido, debe tener entre 2 y 200 caracteres")]
    InvalidName,

    #[error("Descripción inválida, debe tener entre 2 y 2000 caracteres")]
    InvalidDescription,

    #[error("El menú debe contener al menos una receta.")]
    EmptyRecipeList,

    #[error("No deben haber recetas duplicadas.")]
    DuplicateRecipes,

    #[error("El número de personas debe ser un entero positivo de entre 1 y 5 dígitos.")]
    InvalidPeopleCount,

    #[error("Fecha inválida '{0}', el formato esperado es AAAA-MM-DD HH:MM")]
    MalformedDate(String),

    #[error("La fecha de inicio no puede ser mayor que la fecha de fin")]
    StartAfterEnd,

    #[error("Las fechas deben ser mayores que la fecha actual")]
    DatesInPast,

    #[error("Ya existe un menú con fechas superpuestas en este restaurante")]
    OverlappingMenu,

    #[error("El menú ya existe con ese nombre.")]
    DuplicateMenuName,

    #[error("Al menos una receta seleccionada no existe")]
    UnknownRecipe,

    #[error("El restaurante no se seleccionó")]
    RestaurantNotSelected,

    #[error("Acceso denegado")]
    AccessDenied,
}

/// Failure of a menu operation that talks to storage.
#[derive(Error, Debug)]
pub enum MenuError<E> {
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    #[error("menu storage failed: {0}")]
    Store(#[source] E),
}

/// Failure while building a purchase report.
#[derive(Error, Debug)]
pub enum ReportError<E> {
    #[error("Al menos una receta seleccionada no existe")]
    UnknownRecipe { reference: String },

    #[error("La receta '{recipe}' usa un ingrediente que no existe ({ingredient_id})")]
    UnknownIngredient { recipe: String, ingredient_id: i32 },

    #[error("La receta '{recipe}' tiene una porción inválida")]
    InvalidPortion { recipe: String },

    #[error("El número de personas debe ser un entero positivo")]
    InvalidPeopleCount,

    #[error("La cantidad o el costo de '{ingredient}' es demasiado grande")]
    QuantityOutOfRange { ingredient: String },

    #[error("report storage failed: {0}")]
    Store(#[source] E),
}

impl<E> ReportError<E> {
    /// True for failures caused by the request rather than by storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReportError::Store(_))
    }
}
