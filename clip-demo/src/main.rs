use std::fmt::Display;

use clip::{App, Flag, NamedValue, Parser, Scalar};
use lazy_format::lazy_format;

fn summary<T: Scalar + Display>(option: &NamedValue<T>) -> impl Display + '_ {
    lazy_format!(
        "{}: .count = {}, .value = {}",
        option.name(),
        option.count(),
        option.get()
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut parser = Parser::new(
        App::new("demo")
            .about("My awesome app. Parsed by clip!")
            .author("Zakhary Kaplan <zakharykaplan@gmail.com>")
            .version("0.1.0"),
    );

    parser
        .add(
            NamedValue::<f64>::new("double")
                .shortname('d')
                .help("Sample double."),
        )?
        .add(
            NamedValue::<i64>::new("int")
                .shortname('i')
                .help("Sample integer."),
        )?
        .add(
            NamedValue::<String>::new("string")
                .shortname('s')
                .help("Sample string.")
                .value("Hello, world!"),
        )?
        .add(Flag::new("flag").shortname('f').help("Sample flag."))?;

    parser.parse();

    let double = parser.get_named::<f64>("double")?;
    let int = parser.get_named::<i64>("int")?;
    let string = parser.get_named::<String>("string")?;
    let flag = parser.get_flag("flag")?;

    log::debug!(
        "parsed {} parameters: double = {}, int = {}, string = {:?}, flag = {}",
        parser.registry().parameters().count(),
        double.get(),
        int.get(),
        string.get(),
        flag.count()
    );

    if double.count() > 0 {
        println!("{}", summary(double));
    }

    if int.count() > 0 {
        println!("{}", summary(int));
    }

    if string.count() > 0 {
        println!("{}", summary(string));
    }

    if flag.count() > 0 {
        println!("{}: .count = {}", flag.name(), flag.count());
    }

    Ok(())
}
