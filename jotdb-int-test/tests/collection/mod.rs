mod create_test;
mod delete_test;
mod save_test;
mod update_test;
