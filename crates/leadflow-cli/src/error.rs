use anyhow::Error;
use leadflow_config::ConfigError;
use leadflow_core::{CoreError, FilterParseError, GatewayError, ImportError, OpError};
use leadflow_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            });
        }
        if let Some(op_err) = cause.downcast_ref::<OpError>() {
            return ExitCode::from(op_exit_code(op_err));
        }
        if let Some(gateway_err) = cause.downcast_ref::<GatewayError>() {
            return ExitCode::from(gateway_exit_code(gateway_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(core_exit_code(core_err));
        }
        if cause.downcast_ref::<FilterParseError>().is_some()
            || cause.downcast_ref::<ImportError>().is_some()
        {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn op_exit_code(err: &OpError) -> u8 {
    match err {
        OpError::Core(err) => core_exit_code(err),
        OpError::Gateway(err) => gateway_exit_code(err),
        OpError::Import(_) => EXIT_INVALID_INPUT,
        OpError::Export(_) => EXIT_FAILURE,
    }
}

fn gateway_exit_code(err: &GatewayError) -> u8 {
    match err {
        GatewayError::NotFound { .. } => EXIT_NOT_FOUND,
        GatewayError::Conflict(_) => EXIT_INVALID_INPUT,
        GatewayError::Backend(inner) => match inner.downcast_ref::<StoreError>() {
            Some(store_err) => store_exit_code(store_err),
            None => EXIT_FAILURE,
        },
    }
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::NotFound { .. } => EXIT_NOT_FOUND,
        _ => EXIT_INVALID_INPUT,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::InvalidDataPath
        | StoreErrorKind::DuplicateEmail
        | StoreErrorKind::Core => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::InvalidStoredValue
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidStatuses(_)
        | ConfigError::InvalidActivityLimit(_)
        | ConfigError::InvalidStaleDays(_)
        | ConfigError::InvalidActorId(_)
        | ConfigError::EmptyDefaultSource
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
