use std::io::BufRead;

use kanal::AsyncReceiver;

/// Read stdin lines on a plain thread
///
/// The reader thread is detached: a pending read never holds up runtime shutdown.
pub fn stdin_lines(capacity: usize) -> Result<AsyncReceiver<String>, anyhow::Error> {
    let (tx, rx) = kanal::bounded(capacity);
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let forwarded = forward_lines(std::io::stdin().lock(), &tx);
            tracing::debug!("stdin closed after {} lines", forwarded);
        })?;
    Ok(rx.to_async())
}

/// Send trimmed non-empty lines until EOF or until the receiver is gone
fn forward_lines<R: BufRead>(reader: R, tx: &kanal::Sender<String>) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if tx.send(line.to_string()).is_err() {
            break;
        }
        forwarded += 1;
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_trimmed_non_empty_lines() {
        let (tx, rx) = kanal::unbounded();
        let forwarded = forward_lines(&b"enter 0\n\n  leave 0  \nJeg liker hunden.\n"[..], &tx);

        assert_eq!(forwarded, 3);
        let mut seen = Vec::new();
        while let Ok(Some(line)) = rx.try_recv() {
            seen.push(line);
        }
        assert_eq!(seen, vec!["enter 0", "leave 0", "Jeg liker hunden."]);
    }

    #[test]
    fn stops_when_the_receiver_is_dropped() {
        let (tx, rx) = kanal::unbounded();
        drop(rx);
        assert_eq!(forward_lines(&b"a\nb\n"[..], &tx), 0);
    }
}
