mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_current, handle_delete, handle_edit, handle_list, handle_new, handle_select,
    handle_show, resolve_data_dir, resolve_id,
};
