//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use taskgrid_core::core::config::{ApplicationCfg, DEFAULT_CONFIG};
use taskgrid_core::core::geojson::read_aoi;
use taskgrid_core::core::{parse_config, read_config, Config, Shape, WebMercator};
use taskgrid_core::service::GridService;
use tile_grid::TilingScheme;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            timestamp,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn exit_with_error(msg: &str) -> ! {
    eprintln!("{}", msg);
    process::exit(1)
}

fn config_from_args(args: &ArgMatches<'_>) -> ApplicationCfg {
    let config = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath)
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "")
    };
    config.unwrap_or_else(|err| exit_with_error(&format!("Error reading configuration - {}", err)))
}

fn service_from_args(args: &ArgMatches<'_>) -> GridService {
    let mut config = config_from_args(args);
    if let Some(crs) = args.value_of("crs") {
        config.output.crs = crs.to_string();
    }
    GridService::from_config(&config)
        .unwrap_or_else(|err| exit_with_error(&format!("Error reading configuration - {}", err)))
}

fn aoi_from_args(args: &ArgMatches<'_>) -> Shape<WebMercator> {
    let path = args
        .value_of("aoi")
        .unwrap_or_else(|| exit_with_error("Missing argument 'aoi'"));
    let json = fs::read_to_string(path)
        .unwrap_or_else(|err| exit_with_error(&format!("Error reading '{}' - {}", path, err)));
    read_aoi(&json).unwrap_or_else(|err| exit_with_error(&format!("{} - {}", path, err)))
}

fn zoom_arg(args: &ArgMatches<'_>, name: &str) -> Option<u8> {
    args.value_of(name).map(|s| {
        u8::from_str(s).unwrap_or_else(|_| {
            exit_with_error(&format!("Error parsing '{}' as integer value", name))
        })
    })
}

fn generate(args: &ArgMatches<'_>) {
    let service = service_from_args(args);
    let aoi = aoi_from_args(args);
    let zoom = zoom_arg(args, "zoom");
    let tasks = service
        .generate(&aoi, zoom)
        .unwrap_or_else(|err| exit_with_error(&err.to_string()));
    if tasks.is_empty() {
        warn!("No tasks could be generated for this area");
    }
    let result = match args.value_of("output") {
        Some(path) => File::create(path)
            .map_err(|err| format!("Error creating '{}' - {}", path, err))
            .and_then(|file| service.write_geojson(&tasks, BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let result = service.write_geojson(&tasks, stdout.lock());
            println!();
            result
        }
    };
    if let Err(err) = result {
        exit_with_error(&err);
    }
}

fn drilldown(args: &ArgMatches<'_>) {
    let service = service_from_args(args);
    let aoi = aoi_from_args(args);
    let minzoom = zoom_arg(args, "minzoom").unwrap_or(1);
    let maxzoom = zoom_arg(args, "maxzoom").unwrap_or(service.zoom);
    let progress = args.value_of("progress").map_or(true, |s| {
        bool::from_str(s).unwrap_or_else(|_| {
            exit_with_error("Error parsing 'progress' as boolean value")
        })
    });
    let stats = service
        .drilldown(&aoi, minzoom, maxzoom, progress)
        .unwrap_or_else(|err| exit_with_error(&err.to_string()));
    debug!("{:?}", stats);
    print!("{}", stats.as_csv());
}

fn main() {
    dotenv().ok();
    let scheme = TilingScheme::web_mercator();
    let about = format!(
        "Task grid generator aligned to web map tiles (zoom 1 cell size: {:.2} m)",
        scheme.step(1)
    );
    let mut app = App::new("taskgrid")
        .version(crate_version!())
        .about(about.as_str())
        .subcommand(SubCommand::with_name("generate")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--aoi=<FILE> 'Area of interest (GeoJSON)'
                                              --zoom=[LEVEL] 'Zoom level of task cells'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --crs=[EPSG:3857|EPSG:4326] 'Coordinate system of output'
                                              --output=[FILE] 'Write GeoJSON to FILE instead of stdout'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate task grid for an area of interest"))
        .subcommand(SubCommand::with_name("drilldown")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--aoi=<FILE> 'Area of interest (GeoJSON)'
                                              --minzoom=[LEVEL] 'Minimum zoom level'
                                              --maxzoom=[LEVEL] 'Maximum zoom level'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --progress=[true|false] 'Show progress bar'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Task grid statistics per zoom level"))
        .subcommand(SubCommand::with_name("genconfig")
                        .about("Generate configuration template"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("generate", Some(sub_m)) => {
                init_logger(sub_m);
                generate(sub_m);
            }
            ("drilldown", Some(sub_m)) => {
                init_logger(sub_m);
                drilldown(sub_m);
            }
            ("genconfig", Some(_)) => {
                println!("{}", GridService::gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
