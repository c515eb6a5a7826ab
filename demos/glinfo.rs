// glload/demos/glinfo.rs
//
//! Creates an off-screen context with `surfman`, loads it, and prints what the driver supports.

use clap::{App, Arg};
use glload::{Feature, Gl};
use surfman::{Connection, ContextAttributeFlags, ContextAttributes, GLVersion};

static APP_NAME: &'static str = "glload info";

fn main() {
    let matches = App::new(APP_NAME)
        .arg(
            Arg::with_name("hardware")
                .short("H")
                .long("hardware")
                .help("Use hardware rendering"),
        )
        .arg(
            Arg::with_name("software")
                .short("s")
                .long("software")
                .conflicts_with("hardware")
                .help("Use software rendering"),
        )
        .arg(
            Arg::with_name("missing")
                .short("m")
                .long("missing")
                .help("List entry points the platform could not resolve"),
        )
        .get_matches();

    let connection = Connection::new().unwrap();
    let adapter = if matches.is_present("software") {
        connection.create_software_adapter().unwrap()
    } else if matches.is_present("hardware") {
        connection.create_hardware_adapter().unwrap()
    } else {
        connection.create_adapter().unwrap()
    };
    let mut device = connection.create_device(&adapter).unwrap();

    let context_attributes = ContextAttributes {
        version: GLVersion::new(3, 3),
        flags: ContextAttributeFlags::empty(),
    };
    let context_descriptor = device
        .create_context_descriptor(&context_attributes)
        .unwrap();
    let mut context = device.create_context(&context_descriptor, None).unwrap();
    device.make_context_current(&context).unwrap();

    let gl = match Gl::load_with(|symbol_name| device.get_proc_address(&context, symbol_name)) {
        Ok(gl) => gl,
        Err(error) => {
            eprintln!("{}: {}", APP_NAME, error);
            device.destroy_context(&mut context).unwrap();
            std::process::exit(1);
        }
    };

    println!("OpenGL {} ({:?}), encoded as {}", gl.version(), gl.api(), gl.version().encoded());
    match gl.capabilities().highest_version() {
        Some(version) => println!("Newest known version: {}", version),
        None => println!("Newest known version: none"),
    }

    let extensions: Vec<Feature> = gl.capabilities().supported_extensions().collect();
    println!("{} known extensions:", extensions.len());
    for extension in &extensions {
        let missing = gl.missing_commands(*extension).count();
        if missing == 0 {
            println!("    {}", extension);
        } else {
            println!("    {} ({} entry points missing)", extension, missing);
        }
    }

    println!(
        "{} of {} entry points resolved",
        gl.loaded_count(),
        glload::gl::COMMAND_COUNT
    );
    if matches.is_present("missing") {
        for command in gl.unresolved() {
            println!("    {}", command);
        }
    }

    device.destroy_context(&mut context).unwrap();
}
