//! elfsect: read named sections out of ELF64 executables.
//!
//! Only the file header, the section header table and the section-name
//! string table are read before the requested section, so pulling a build
//! ID out of a large binary touches a few kilobytes at most.

mod cli;
mod verbose;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lazy_elf::{ElfError, ElfSectionReader, FileSource, SectionHeader, block_on};

use crate::verbose::{Timer, Verbosity};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        cli::Command::Read(ref args) => cmd_read(args),
        cli::Command::List(ref args) => cmd_list(&args.file),
        cli::Command::Header(ref args) => cmd_header(&args.file, args.index),
    }
}

/// Open `path` as a section reader.
fn open(path: &Path) -> Result<ElfSectionReader<FileSource>> {
    ElfSectionReader::open(path).with_context(|| format!("opening {}", path.display()))
}

/// Attach the image path to a reader error.
fn elf_err(path: &Path) -> impl FnOnce(ElfError) -> anyhow::Error + '_ {
    move |e| anyhow::anyhow!("{}: {e}", path.display())
}

// ===========================================================================
// Commands
// ===========================================================================

fn cmd_read(args: &cli::ReadArgs) -> Result<()> {
    let _t = Timer::start(format!("read {}", args.section));
    let mut reader = open(&args.file)?;

    let data = match block_on(reader.read_section(&args.section)) {
        Ok(data) => data,
        Err(ElfError::SectionNotFound) => {
            bail!("section {} not found in {}", args.section, args.file.display())
        }
        Err(e) => return Err(elf_err(&args.file)(e)),
    };
    log::debug!("{}: {} bytes", args.section, data.len());

    if let Some(ref output) = args.output {
        std::fs::write(output, &data).with_context(|| format!("writing {}", output.display()))?;
        log::info!("wrote {} bytes to {}", data.len(), output.display());
    } else if args.raw {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&data).context("writing to stdout")?;
        stdout.flush().context("writing to stdout")?;
    } else {
        println!("{}", hex(&data));
    }
    Ok(())
}

fn cmd_list(path: &Path) -> Result<()> {
    let _t = Timer::start("list");
    let mut reader = open(path)?;

    let count = block_on(reader.header()).map_err(elf_err(path))?.section_header_entry_count;
    let names: Vec<String> = block_on(reader.name_table())
        .map_err(elf_err(path))?
        .iter()
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect();

    println!("{:>4}  {:<24} {:>10} {:>18} {:>18}", "idx", "name", "type", "offset", "size");
    for index in 0..count {
        let shdr = block_on(reader.read_section_header(index)).map_err(elf_err(path))?;
        println!(
            "{:>4}  {:<24} {:>10} {:#18x} {:#18x}",
            index,
            names[usize::from(index)],
            type_name(shdr.section_type),
            shdr.offset,
            shdr.size,
        );
    }
    Ok(())
}

fn cmd_header(path: &Path, index: u16) -> Result<()> {
    let mut reader = open(path)?;
    let shdr = block_on(reader.read_section_header(index)).map_err(elf_err(path))?;
    print!("{}", format_header(index, &shdr));
    Ok(())
}

// ===========================================================================
// Formatting
// ===========================================================================

/// Lowercase hex encoding, no separators.
fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Short name for the common section types.
fn type_name(section_type: u32) -> String {
    match section_type {
        lazy_elf::SHT_NULL => "NULL".into(),
        lazy_elf::SHT_PROGBITS => "PROGBITS".into(),
        lazy_elf::SHT_SYMTAB => "SYMTAB".into(),
        lazy_elf::SHT_STRTAB => "STRTAB".into(),
        lazy_elf::SHT_NOTE => "NOTE".into(),
        lazy_elf::SHT_NOBITS => "NOBITS".into(),
        other => format!("{other:#x}"),
    }
}

fn format_header(index: u16, shdr: &SectionHeader) -> String {
    format!(
        "index:        {index}\n\
         name offset:  {:#x}\n\
         type:         {}\n\
         flags:        {:#x}\n\
         address:      {:#x}\n\
         offset:       {:#x}\n\
         size:         {:#x}\n\
         link:         {}\n\
         info:         {}\n\
         alignment:    {:#x}\n\
         entry size:   {:#x}\n",
        shdr.name_offset,
        type_name(shdr.section_type),
        shdr.flags,
        shdr.load_address,
        shdr.offset,
        shdr.size,
        shdr.link,
        shdr.info,
        shdr.alignment,
        shdr.entry_size,
    )
}
