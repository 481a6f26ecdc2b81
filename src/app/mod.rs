pub mod check_use_case;
pub mod update_use_case;
