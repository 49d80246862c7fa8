pub mod email_log;
