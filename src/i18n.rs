//! UI Strings
//!
//! Labels and alert texts per locale.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Locale::En,
            _ => Locale::De,
        }
    }
}

#[derive(Debug)]
pub struct Messages {
    // Alerts
    pub load_failed: &'static str,
    pub add_failed: &'static str,
    pub change_failed: &'static str,
    pub delete_category_failed: &'static str,
    pub add_task_failed: &'static str,
    pub delete_task_failed: &'static str,
    pub login_failed: &'static str,

    // Board labels
    pub board_title: &'static str,
    pub new_category_placeholder: &'static str,
    pub add_category: &'static str,
    pub delete_category: &'static str,
    pub add_task: &'static str,
    pub title_placeholder: &'static str,
    pub details_placeholder: &'static str,
    pub complete: &'static str,
    pub delete_task: &'static str,

    // Auth page
    pub login: &'static str,
    pub register: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub to_register: &'static str,
    pub to_login: &'static str,
}

static DE: Messages = Messages {
    load_failed: "Fehler beim Laden der Aufgaben!",
    add_failed: "Fehler beim hinzufügen!",
    change_failed: "Fehler beim ändern!",
    delete_category_failed: "Fehler beim Löschen der Kategorie!",
    add_task_failed: "Fehler beim Hinzufügen der Aufgabe!",
    delete_task_failed: "Fehler beim Löschen der Aufgabe!",
    login_failed: "Fehler bei der Anmeldung!",

    board_title: "Aufgaben",
    new_category_placeholder: "Neue Kategorie",
    add_category: "Kategorie hinzufügen",
    delete_category: "Kategorie löschen",
    add_task: "Aufgabe hinzufügen",
    title_placeholder: "Titel",
    details_placeholder: "Details",
    complete: "Erledigt",
    delete_task: "Löschen",

    login: "Anmelden",
    register: "Registrieren",
    username: "Benutzername",
    password: "Passwort",
    to_register: "Noch kein Konto? Registrieren",
    to_login: "Schon registriert? Anmelden",
};

static EN: Messages = Messages {
    load_failed: "Failed to load tasks!",
    add_failed: "Failed to add!",
    change_failed: "Failed to save changes!",
    delete_category_failed: "Failed to delete category!",
    add_task_failed: "Failed to add task!",
    delete_task_failed: "Failed to delete task!",
    login_failed: "Login failed!",

    board_title: "Tasks",
    new_category_placeholder: "New category",
    add_category: "Add category",
    delete_category: "Delete category",
    add_task: "Add task",
    title_placeholder: "Title",
    details_placeholder: "Details",
    complete: "Done",
    delete_task: "Delete",

    login: "Log in",
    register: "Register",
    username: "Username",
    password: "Password",
    to_register: "No account yet? Register",
    to_login: "Already registered? Log in",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::De => &DE,
            Locale::En => &EN,
        }
    }
}
