mod category;
mod event;
mod user;
