use std::env;

use anyhow::Context;
use charcount::terminal::{handle_event, Action};
use charcount::{load_config, CharCountFilter, DebugFilter, InputFilter, Terminal, TextField};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load configuration
    let settings = load_config();

    // Budget from the command line wins over the config file
    let max = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid max '{}'", arg))?,
        None => settings.input.max,
    };
    log::info!("input limited to {} (debug filter: {})", max, settings.input.debug_filter);

    let filter: Box<dyn InputFilter> = if settings.input.debug_filter {
        Box::new(DebugFilter::new(CharCountFilter::new(max)))
    } else {
        Box::new(CharCountFilter::new(max))
    };
    let mut field = TextField::new();
    field.set_filters(vec![filter]);

    let submitted = {
        let mut terminal = Terminal::new()?;
        loop {
            terminal.render(&field, max)?;
            let event = terminal.read_event()?;
            match handle_event(&mut field, event) {
                Action::Continue => {}
                Action::Submit => break true,
                Action::Quit => break false,
            }
        }
    };

    // Terminal is restored by now
    if submitted {
        println!("{}", field.text());
        log::info!("submitted {}", field.counter(max));
    }

    Ok(())
}
