//! Menu loop that owns the session collection.
//!
//! The collection is loaded once when the shell opens and written back only
//! when the user picks the exit option. Closing stdin ends the session with
//! an error and leaves the data file untouched.

use crate::config::Config;
use crate::console::Console;
use crate::crud::{self, OperationError};
use crate::product::Product;
use crate::repository::{self, PersistenceError};
use std::fmt;
use std::io::{self, BufRead, Write};

pub const MENU: &[&str] = &[
    "",
    "Sistema de Gestión de Productos",
    "1. Crear producto",
    "2. Listar productos",
    "3. Actualizar producto",
    "4. Eliminar producto",
    "5. Salir",
];
pub const MSG_INVALID_CHOICE: &str = "Opción no válida. Inténtelo de nuevo.";
pub const MSG_SAVED: &str = "Datos guardados. Salir...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    List,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(MenuChoice::Create),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Fatal session failures.
#[derive(Debug)]
pub enum ShellError {
    Persistence(PersistenceError),
    Io(io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Persistence(err) => write!(f, "{err}"),
            ShellError::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Display already carries the persistence message; skip to its cause.
            ShellError::Persistence(err) => std::error::Error::source(err),
            ShellError::Io(err) => Some(err),
        }
    }
}

impl From<PersistenceError> for ShellError {
    fn from(err: PersistenceError) -> Self {
        ShellError::Persistence(err)
    }
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

pub struct Shell<R, W> {
    config: Config,
    products: Vec<Product>,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Load the configured data file and bind the console.
    pub fn open(config: Config, console: Console<R, W>) -> Result<Self, ShellError> {
        let products = repository::load(&config.data_path)?;
        Ok(Self::with_products(config, products, console))
    }

    pub fn with_products(config: Config, products: Vec<Product>, console: Console<R, W>) -> Self {
        Self {
            config,
            products,
            console,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Run menu iterations until the user exits. Saves on exit only.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            for line in MENU {
                self.console.say(line)?;
            }
            let selection = self.console.prompt("Seleccione una opción: ")?;
            let Some(choice) = MenuChoice::parse(&selection) else {
                self.console.say(MSG_INVALID_CHOICE)?;
                continue;
            };
            if choice == MenuChoice::Exit {
                repository::save(&self.products, &self.config.data_path)?;
                self.console.say(MSG_SAVED)?;
                return Ok(());
            }
            self.dispatch(choice)?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        let products = &mut self.products;
        let console = &mut self.console;
        let result: Result<(), OperationError> = match choice {
            MenuChoice::Create => crud::create_product(products, console),
            MenuChoice::List => crud::list_products(products, console).map_err(Into::into),
            MenuChoice::Update => crud::update_product(products, console),
            MenuChoice::Delete => crud::delete_product(products, console),
            MenuChoice::Exit => Ok(()),
        };
        crud::report(console, result)
    }

    pub fn into_parts(self) -> (Vec<Product>, W) {
        (self.products, self.console.into_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn scripted(
        config: Config,
        products: Vec<Product>,
        script: &str,
    ) -> Shell<Cursor<String>, Vec<u8>> {
        let console = Console::new(Cursor::new(script.to_string()), Vec::new());
        Shell::with_products(config, products, console)
    }

    #[test]
    fn menu_choices_map_one_to_five() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Create));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn invalid_choice_reprompts_then_exit_saves() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::with_data_path(dir.path().join("productos.json"));
        let products = vec![Product::plain("Caja", 3.0, 7)];
        let mut shell = scripted(config.clone(), products, "9\n5\n");
        shell.run().expect("session ends cleanly");

        let (products, out) = shell.into_parts();
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Sistema de Gestión de Productos").count(), 2);
        assert!(text.contains(MSG_INVALID_CHOICE));
        assert!(text.ends_with("Datos guardados. Salir...\n"));
        assert_eq!(repository::load(&config.data_path).expect("reload"), products);
    }

    #[test]
    fn closed_input_does_not_save() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::with_data_path(dir.path().join("productos.json"));
        let products = vec![Product::plain("Caja", 3.0, 7)];
        let mut shell = scripted(config.clone(), products, "2\n");
        let err = shell.run().expect_err("stdin closes before exit");
        assert!(matches!(
            err,
            ShellError::Io(ref io) if io.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert_eq!(shell.products().len(), 1);
        assert!(!config.data_path.exists());
    }
}
