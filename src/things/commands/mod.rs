/*!
Command builders, one input type per Things URL-scheme command.

  add.rs     - AddInput (`add`), AddProjectInput (`add-project`)
  update.rs  - UpdateInput (`update`), UpdateProjectInput (`update-project`)
  lookup.rs  - ShowInput (`show`), SearchInput (`search`), VersionInput (`version`)
  json.rs    - JsonInput (`json`)

Every input deserializes from the camelCase JSON the MCP tools receive and
implements `ThingsCommand`: validation happens in `build`, before any
parameter reaches the dispatcher.
*/

mod add;
mod json;
mod lookup;
mod update;

pub use add::{AddInput, AddProjectInput};
pub use json::JsonInput;
pub use lookup::{SearchInput, ShowInput, VersionInput};
pub use update::{UpdateInput, UpdateProjectInput};

use super::error::ThingsError;
use super::query::Params;

/// A Things URL-scheme command with validated inputs.
pub trait ThingsCommand {
    /// Path segment after `things:///`.
    const COMMAND: &'static str;

    /// Validate the input and produce its parameter mapping.
    fn build(&self) -> Result<Params, ThingsError>;
}
