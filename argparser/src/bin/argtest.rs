// Demo program for the integration tests: declares one option of every
// kind, parses the command line and prints what it got.

use argparser::{Opt, Parser, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut check = 0;
    let mut number = 0;
    let mut percent = 0.0;
    let mut lastname = None;
    let mut upper = 0;
    let mut no_short = 0;
    let mut no_long = 0;
    let mut seven = 0;
    let mut verbose = 0;
    let mut with_callback = 0;
    let mut level = 0;

    let stop = std::env::var_os("ARGTEST_STOP_AT_NON_OPTION").is_some();
    let mut args: Vec<String> = std::env::args().collect();

    let survivors = Parser::new(vec![
        Opt::group("Basic Options"),
        Opt::help(),
        Opt::boolean(&mut check)
            .short('c')
            .long("check")
            .description("example for a boolean"),
        Opt::integer(&mut number)
            .short('n')
            .long("number")
            .description("example for an integer"),
        Opt::float(&mut percent)
            .short('p')
            .long("percent")
            .description("example for a float"),
        Opt::string(&mut lastname)
            .short('l')
            .long("lastname")
            .description("example for a string"),
        Opt::group("More Options"),
        Opt::boolean(&mut upper)
            .short('A')
            .long("UpperChars")
            .description("example with upper characters"),
        Opt::boolean(&mut no_short)
            .long("no-short")
            .description("example without short name"),
        Opt::boolean(&mut no_long)
            .short('s')
            .description("example with no long name"),
        Opt::boolean(&mut seven)
            .short('7')
            .long("seven77")
            .description("example with numeric names"),
        Opt::boolean(&mut verbose)
            .short('v')
            .long("verbose")
            .negatable()
            .description("more output, repeatable"),
        Opt::group("Options with Callbacks"),
        Opt::integer(&mut with_callback)
            .short('x')
            .long("callback")
            .description("example for an integer with callback")
            .callback(|_, opt| {
                if let Some(Value::Integer(v)) = opt.value() {
                    println!("Callback called with value: {}", v);
                }
                Ok(())
            }),
        Opt::integer(&mut level)
            .long("level")
            .description("a value from 0 to 9")
            .callback(|_, opt| match opt.value() {
                Some(Value::Integer(v)) if !(0..=9).contains(&v) => Err(
                    argparser::Error::Callback(format!("level {} is not between 0 and 9", v)),
                ),
                _ => Ok(()),
            }),
    ])
    .usage("argtest [options] [[--] args]")
    .description("Optional brief description of what the program does and how it works.")
    .epilog("Optional description of the program after the description of the arguments.")
    .stop_at_non_option(stop)
    .parse_or_exit(&mut args);

    println!();
    println!("Boolean (-c / --check):    {}", check);
    println!("Integer (-n / --number):   {}", number);
    println!("Float   (-p / --percent):  {:.6}", percent);
    println!(
        "String  (-l / --lastname): {}",
        lastname.as_deref().unwrap_or("(null)")
    );
    println!();
    println!("Upper Characters (-A / --UpperChars): {}", upper);
    println!("No Short Name    (     --no-short):   {}", no_short);
    println!("No Long Name     (-s):                {}", no_long);
    println!("Numeric Names    (-7 / --seven77):    {}", seven);
    println!("Verbose          (-v / --verbose):    {}", verbose);
    println!();
    println!("Integer With Callback (-x / --callback): {}", with_callback);
    println!("Level                 (     --level):    {}", level);
    println!();

    if survivors != 0 {
        println!("argc: {}", survivors);
        for (i, arg) in args.iter().skip(1).enumerate() {
            println!("argv[{}]: {}", i, arg);
        }
    }
}
