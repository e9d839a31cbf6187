use charme::{cmdline, Environment};

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = Environment::global();
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}
