use super::*;
use chatbox::Message;

fn render(printer: &mut TranscriptPrinter, transcript: &Transcript) -> String {
    let mut out = Vec::new();
    printer.sync(transcript, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================
// format_entry
// =============================================================

#[test]
fn format_entry_labels_sender() {
    let mut transcript = Transcript::new();
    transcript.push(Message::user("hello"));
    transcript.push(Message::bot("hi there"));

    let lines: Vec<String> = transcript.iter().map(format_entry).collect();
    assert_eq!(lines, ["you │ hello", "bot │ hi there"]);
}

// =============================================================
// TranscriptPrinter
// =============================================================

#[test]
fn sync_prints_only_new_entries() {
    let mut transcript = Transcript::new();
    let mut printer = TranscriptPrinter::new(false);

    transcript.push(Message::user("one"));
    assert_eq!(render(&mut printer, &transcript), "you │ one\n");
    assert_eq!(render(&mut printer, &transcript), "");

    transcript.push(Message::bot("two"));
    assert_eq!(render(&mut printer, &transcript), "bot │ two\n");
}

#[test]
fn sync_erases_removed_placeholder_on_ansi_terminal() {
    let mut transcript = Transcript::new();
    let mut printer = TranscriptPrinter::new(true);

    transcript.push(Message::user("hello"));
    let placeholder = transcript.push_placeholder();
    assert_eq!(render(&mut printer, &transcript), "you │ hello\nbot │ ...\n");

    transcript.remove_placeholder(placeholder);
    transcript.push(Message::bot("hi there"));
    assert_eq!(render(&mut printer, &transcript), "\x1b[1A\x1b[2Kbot │ hi there\n");

    // Nothing left to erase.
    assert_eq!(render(&mut printer, &transcript), "");
}

#[test]
fn sync_keeps_placeholder_line_without_ansi() {
    let mut transcript = Transcript::new();
    let mut printer = TranscriptPrinter::new(false);

    let placeholder = transcript.push_placeholder();
    render(&mut printer, &transcript);
    transcript.remove_placeholder(placeholder);
    transcript.push(Message::bot("hi there"));

    assert_eq!(render(&mut printer, &transcript), "bot │ hi there\n");
}

#[test]
fn sync_leaves_placeholder_that_was_not_removed() {
    let mut transcript = Transcript::new();
    let mut printer = TranscriptPrinter::new(true);

    transcript.push_placeholder();
    render(&mut printer, &transcript);
    transcript.push(Message::bot("⚠️ Error connecting to server."));

    assert_eq!(render(&mut printer, &transcript), "bot │ ⚠️ Error connecting to server.\n");
}
