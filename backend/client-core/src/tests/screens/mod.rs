mod documents;
mod login;
mod shell;
