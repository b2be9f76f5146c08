use vergen::{BuildBuilder, Emitter};
use vergen_git2::Git2Builder;

// Emits VERGEN_BUILD_DATE and VERGEN_GIT_DESCRIBE for `mastosky --version`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;

    // crates.io tarballs have no .git directory
    let git2_result = Git2Builder::default()
        .describe(true, true, None)
        .sha(true)
        .build();

    if let Ok(git2) = git2_result {
        Emitter::default()
            .add_instructions(&build)?
            .add_instructions(&git2)?
            .emit()?;
    } else {
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");

        Emitter::default().add_instructions(&build)?.emit()?;
    }

    Ok(())
}
