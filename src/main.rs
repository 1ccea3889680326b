//! stencil's command-line entry point.
//! Renders one template file with values read from a JSON or YAML mapping.

use std::io::Write;
use std::sync::Arc;

use stencil::{
    cli::{get_args, Args, Escape},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    placeholder::{Placeholder, Transformer},
    template::Template,
    transformers,
    values::{load_values, load_values_from_stdin},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Compiles the template file
/// 2. Loads values from the values file or stdin
/// 3. Binds every value to the placeholder of the same name
/// 4. Writes the rendered text to the output file or stdout
fn run(args: Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.template).map_err(Error::IoError)?;
    let template = Template::new(&text)?.strict(args.strict);

    let values = match (&args.values, args.stdin) {
        (Some(path), _) => load_values(path)?,
        (None, true) => load_values_from_stdin()?,
        (None, false) => Default::default(),
    };

    let transformer: Option<Transformer> = match args.escape {
        Escape::Raw => None,
        Escape::Text => Some(Arc::new(transformers::text) as Transformer),
    };

    let declared: Vec<&str> = template.placeholders().collect();
    let mut bound = Vec::with_capacity(values.len());
    for (name, value) in &values {
        if !declared.contains(&name.as_str()) {
            log::warn!("Template has no placeholder '{name}'");
            continue;
        }
        let mut placeholder = Placeholder::new(name.as_str())?;
        if let Some(transformer) = &transformer {
            placeholder = placeholder.with_transformer(transformer.clone());
        }
        bound.push(placeholder.set(value)?);
    }

    let instance = template.replace(&bound);
    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(Error::IoError)?;
            let written = instance.write_to(&mut file)?;
            log::debug!("Wrote {written} bytes to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            instance.write_to(&mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
