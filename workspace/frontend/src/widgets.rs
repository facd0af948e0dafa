pub mod loading;
pub mod toast;
