pub(super) mod info;
mod panels;
