//! The `tcs` command forest.

use std::path::Path;
use std::rc::Rc;

use cmdtree_core::{CommandNode, FlagSpec, FlagTable, FlaggedCommand, SideChannelFlags};

use crate::app::App;
use crate::catalog::{OperationSpec, ResourceSpec, SERVICES, ServiceSpec};
use crate::config::CliConfig;
use crate::request::{PAGE_FLAG, PER_PAGE_FLAG};

pub const PROGRAM_NAME: &str = "tcs";
pub const CONFIGURE_COMMAND: &str = "configure";
pub const API_KEY_FLAG: &str = "api_key";
pub const HEADER_KEY_FLAG: &str = "header_key";
pub const HEADER_VAL_FLAG: &str = "header_val";

/// Global flags accepted anywhere on the command line.
pub fn side_channel_flags() -> SideChannelFlags {
    SideChannelFlags::new()
        .declare(HEADER_KEY_FLAG, "additive http header key")
        .declare(HEADER_VAL_FLAG, "additive http header value")
}

/// Builds every service group plus the top-level `configure` command.
pub fn command_forest(app: &Rc<App>, config_path: &Path) -> Vec<CommandNode> {
    let mut commands: Vec<CommandNode> = SERVICES
        .iter()
        .map(|service| service_group(app, service))
        .collect();
    commands.push(configure_command(app, config_path));
    commands
}

fn service_group(app: &Rc<App>, service: &'static ServiceSpec) -> CommandNode {
    let resources = service
        .resources
        .iter()
        .map(|resource| resource_group(app, service, resource))
        .collect();
    CommandNode::group(service.name, service.description, resources)
}

fn resource_group(
    app: &Rc<App>,
    service: &'static ServiceSpec,
    resource: &'static ResourceSpec,
) -> CommandNode {
    let operations = resource
        .operations
        .iter()
        .map(|operation| operation_command(app, service.name, resource.name, operation))
        .collect();
    CommandNode::group(resource.name, resource.description, operations)
}

fn operation_command(
    app: &Rc<App>,
    service: &'static str,
    resource: &'static str,
    operation: &'static OperationSpec,
) -> CommandNode {
    let app = Rc::clone(app);

    if !operation.takes_flags() {
        return CommandNode::leaf(operation.verb, operation.description, move || {
            app.call(service, resource, operation, FlagTable::new())
        });
    }

    let mut flags: Vec<FlagSpec> = operation
        .required
        .iter()
        .map(|name| FlagSpec::required(name))
        .chain(operation.optional.iter().map(|name| FlagSpec::optional(name)))
        .collect();
    if operation.paged {
        flags.push(FlagSpec::optional(PAGE_FLAG));
        flags.push(FlagSpec::optional(PER_PAGE_FLAG));
    }

    let mut command = FlaggedCommand::new(
        operation.verb,
        operation.description,
        flags,
        move |table| app.call(service, resource, operation, table),
    );
    if let Some(positional) = operation.positional {
        command = command.with_positional(positional);
    }
    command.into()
}

fn configure_command(app: &Rc<App>, config_path: &Path) -> CommandNode {
    let app = Rc::clone(app);
    let path = config_path.to_path_buf();

    FlaggedCommand::new(
        CONFIGURE_COMMAND,
        "create configuration file for tcs command line tool with credentials that are used to interact with cloud API",
        Vec::<FlagSpec>::new(),
        move |flags| match CliConfig::with_api_key(flags.value(API_KEY_FLAG)).save(&path) {
            Ok(()) => app.info("Credentials saved"),
            Err(err) => app.report(CONFIGURE_COMMAND, &err),
        },
    )
    .with_positional(API_KEY_FLAG)
    .into()
}
