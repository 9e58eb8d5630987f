//! Exact command lines produced for the Terraform client.

use std::collections::BTreeMap;

use kt_command::{
    ClientVersion, Command, CommandFactory, InitFlags, RunFlags, ValidateFlags,
};
use pretty_assertions::assert_eq;

fn variables() -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();
    variables.insert("instance_count".to_string(), "2".to_string());
    variables.insert("region".to_string(), "eu-west-1".to_string());
    variables
}

fn backend_configurations() -> BTreeMap<String, String> {
    let mut configurations = BTreeMap::new();
    configurations.insert("bucket".to_string(), "kitchen-state".to_string());
    configurations.insert("key".to_string(), "terraform.tfstate".to_string());
    configurations
}

fn run_flags() -> RunFlags {
    RunFlags::new()
        .color(false)
        .lock(false)
        .lock_timeout(30)
        .parallelism(4)
        .variables(variables())
        .variable_files(vec![
            "/kitchen/one.tfvars".to_string(),
            "/kitchen/two files.tfvars".to_string(),
        ])
}

fn init_flags() -> InitFlags {
    InitFlags::new()
        .color(false)
        .lock(true)
        .lock_timeout(30)
        .upgrade(true)
        .backend_configurations(backend_configurations())
        .plugin_directory(Some("/opt/terraform plugins".to_string()))
}

#[test]
fn test_legacy_init() {
    let factory = CommandFactory::new(&ClientVersion::new(0, 11, 4));

    assert_eq!(
        factory.init(init_flags()).build().to_string(),
        "init -input=false -lock=true -lock-timeout=30s -no-color -upgrade -force-copy \
         -backend=true -backend-config=\"bucket=kitchen-state\" \
         -backend-config=\"key=terraform.tfstate\" -get=true -get-plugins=true \
         -plugin-dir='/opt/terraform plugins' -verify-plugins=true"
    );
}

#[test]
fn test_current_init() {
    let factory = CommandFactory::new(&ClientVersion::new(0, 15, 0));

    assert_eq!(
        factory.init(init_flags()).build().to_string(),
        "init -input=false -lock=true -lock-timeout=30s -no-color -upgrade -force-copy \
         -backend=true -backend-config=\"bucket=kitchen-state\" \
         -backend-config=\"key=terraform.tfstate\" -get=true \
         -plugin-dir='/opt/terraform plugins'"
    );
}

#[test]
fn test_init_with_defaults() {
    let factory = CommandFactory::new(&ClientVersion::new(1, 5, 7));

    assert_eq!(
        factory.init(InitFlags::new()).build().to_string(),
        "init -input=false -lock=true -lock-timeout=0s -force-copy -backend=true -get=true"
    );
}

#[test]
fn test_legacy_validate_passes_variables() {
    let factory = CommandFactory::new(&ClientVersion::new(0, 14, 11));
    let flags = ValidateFlags::new()
        .color(false)
        .variables(variables())
        .variable_files(vec!["/kitchen/one.tfvars".to_string()]);

    assert_eq!(
        factory.validate(flags).build().to_string(),
        "validate -no-color -var=\"instance_count=2\" -var=\"region=eu-west-1\" \
         -var-file=/kitchen/one.tfvars"
    );
}

#[test]
fn test_current_validate_drops_variables() {
    let factory = CommandFactory::new(&ClientVersion::new(0, 15, 1));
    let flags = ValidateFlags::new()
        .color(false)
        .variables(variables())
        .variable_files(vec!["/kitchen/one.tfvars".to_string()]);

    assert_eq!(factory.validate(flags).build().to_string(), "validate -no-color");
}

#[test]
fn test_apply() {
    assert_eq!(
        Command::apply(&run_flags()).to_string(),
        "apply -auto-approve -input=false -lock=false -lock-timeout=30s -no-color \
         -parallelism=4 -refresh=true -var=\"instance_count=2\" -var=\"region=eu-west-1\" \
         -var-file=/kitchen/one.tfvars -var-file='/kitchen/two files.tfvars'"
    );
}

#[test]
fn test_destroy() {
    assert_eq!(
        Command::destroy(&run_flags()).to_string(),
        "destroy -auto-approve -input=false -lock=false -lock-timeout=30s -no-color \
         -parallelism=4 -refresh=true -var=\"instance_count=2\" -var=\"region=eu-west-1\" \
         -var-file=/kitchen/one.tfvars -var-file='/kitchen/two files.tfvars'"
    );
}

#[test]
fn test_plan() {
    assert_eq!(
        Command::plan(&RunFlags::new()).to_string(),
        "plan -input=false -lock=true -lock-timeout=0s -parallelism=10 -refresh=true"
    );
}

#[test]
fn test_workspace_and_fixed_commands() {
    assert_eq!(Command::get_update().to_string(), "get -update");
    assert_eq!(Command::output_json().to_string(), "output -json");
    assert_eq!(
        Command::workspace_select("kitchen-terraform-suite").to_string(),
        "workspace select kitchen-terraform-suite"
    );
    assert_eq!(
        Command::workspace_new("kitchen-terraform-suite").to_string(),
        "workspace new kitchen-terraform-suite"
    );
    assert_eq!(
        Command::workspace_delete("kitchen-terraform-suite").to_string(),
        "workspace delete kitchen-terraform-suite"
    );
}
