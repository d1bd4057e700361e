use blueprint_asset::{Blueprint, BlueprintCompiler, CompileOptions, CompilerResultsLog};

use crate::LOG_TARGET;

/// Run one compiler pass over `blueprint`, capturing a structured result log
/// tagged with the asset path. The log is returned for the caller to retain;
/// diagnostics inside it are the host's to report.
pub fn compile_blueprint(
    compiler: &dyn BlueprintCompiler,
    blueprint: &mut Blueprint,
) -> CompilerResultsLog {
    let mut results = CompilerResultsLog::new();
    results.set_source_path(blueprint.path.clone());

    let span = tracing::info_span!(target: LOG_TARGET, "compile", path = %blueprint.path);
    let _entered = span.enter();

    results.begin_event("Compile");
    compiler.compile(blueprint, CompileOptions::default(), &mut results);
    results.end_event();

    results
}
