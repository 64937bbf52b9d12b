pub mod krl_log;
