mod api;
mod helpers;
mod scenarios;
mod session;
