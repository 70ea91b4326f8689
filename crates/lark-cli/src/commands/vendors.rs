use anyhow::Result;
use console::style;
use lark::Vendor;
use strum::IntoEnumIterator;

/// One line per vendor: name, required variables and default model
pub fn describe(vendor: Vendor) -> String {
    let template = vendor.template();
    let mut env_vars = vec![template.api_key_env];
    env_vars.extend(template.base_url_env);

    format!(
        "{:<6} env: {}  default model: {}",
        vendor,
        env_vars.join(", "),
        template.default_model
    )
}

pub fn execute() -> Result<()> {
    println!("{}", style("Supported vendors").bold());
    for vendor in Vendor::iter() {
        println!("  {}", describe(vendor));
    }
    println!(
        "{}",
        style("Set the listed variables before running an agent.").dim()
    );
    Ok(())
}
