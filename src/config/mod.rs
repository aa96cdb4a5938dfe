pub mod files;
pub mod results;
pub mod settings;

pub use files::{
    atomic_write, ensure_data_dir, find_local_dir, get_data_dir, init_local_dir, log_file, read_optional,
    settings_file, tests_file, LOCAL_DIR,
};
pub use results::{load_results, save_results};
pub use settings::{load_settings, save_settings, Settings};
