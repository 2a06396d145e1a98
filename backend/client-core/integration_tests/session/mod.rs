mod login;
mod logout;
mod restore;
