use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::http::Error;

/// Runs blocking file work off the async executor.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| Error::Io(io::Error::other(e)))?
}

pub(crate) fn gzip(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Writes `header` as one CSV row with every value double-quoted.
pub(crate) fn write_header<W: Write>(out: W, header: &[String]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

/// Concatenates `sources` into `dest` in order, optionally preceded by a header
/// row. Gzip sources are decompressed on the way.
pub(crate) fn concat_files(sources: &[PathBuf], dest: &Path, header: Option<&[String]>, gzip: bool) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(dest)?);
    if let Some(header) = header {
        write_header(&mut out, header)?;
    }
    for source in sources {
        let input = BufReader::new(File::open(source)?);
        let mut input: Box<dyn Read> = if gzip {
            Box::new(MultiGzDecoder::new(input))
        } else {
            Box::new(input)
        };
        io::copy(&mut input, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
