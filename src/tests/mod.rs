mod support;

mod notification_tests;
mod task_tests;
mod user_tests;
