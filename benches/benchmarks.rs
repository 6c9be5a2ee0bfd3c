//! Benchmarks for the pagination engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scriptpage::{
    BlockContent, BlockKind, EditEvent, Paginator, ScriptDocument, Selection, StepRange,
};

fn build_screenplay(scenes: usize) -> ScriptDocument {
    let mut doc = ScriptDocument::new();
    for i in 0..scenes {
        doc.push(
            BlockKind::SceneHeader,
            BlockContent::plain(format!("INT. LOCATION {i} - NIGHT")),
        );
        doc.push(
            BlockKind::Action,
            BlockContent::plain(
                "The room is dark. Someone crosses to the window and pulls the \
                 blind aside, letting a thin strip of streetlight fall across \
                 the floor. "
                    .repeat(3),
            ),
        );
        doc.push(
            BlockKind::Character,
            BlockContent::plain(format!("CHARACTER {}", i % 5)),
        );
        doc.push_dialogue(
            "ALICE",
            BlockContent::plain(
                "I told you we should have left before dark. Now look at it out \
                 there. We wait until morning. That's the whole plan. ",
            ),
        );
    }
    doc
}

fn bench_full_pass(c: &mut Criterion) {
    let doc = build_screenplay(100);

    c.bench_function("full_pagination_pass", |b| {
        b.iter(|| {
            let mut paginator = Paginator::new();
            paginator.recompute_now(black_box(&doc), Selection::caret(0));
            black_box(paginator.pages().len())
        });
    });
}

fn bench_incremental_pass(c: &mut Criterion) {
    let mut doc = build_screenplay(100);
    let mut paginator = Paginator::new();

    // Warm the cache and persist the measured heights
    let outcome = paginator.recompute_now(&doc, Selection::caret(doc.size()));
    for update in &outcome.height_updates {
        doc.set_height(update.position, update.height);
    }

    // One keystroke in the middle of the document
    let middle = doc.blocks()[doc.len() / 2].position;
    let event = EditEvent::edit([StepRange::new(middle + 1, middle + 2)]);

    c.bench_function("incremental_keystroke_pass", |b| {
        b.iter(|| {
            let outcome =
                paginator.handle_edit(black_box(&doc), &event, Selection::caret(middle + 2));
            black_box(outcome.frozen)
        });
    });
}

fn bench_page_lookup(c: &mut Criterion) {
    let doc = build_screenplay(200);
    let mut paginator = Paginator::new();
    paginator.recompute_now(&doc, Selection::caret(0));
    let offset = doc.size() / 2;

    c.bench_function("page_at_offset", |b| {
        b.iter(|| black_box(paginator.page_at_offset(black_box(offset))));
    });
}

criterion_group!(benches, bench_full_pass, bench_incremental_pass, bench_page_lookup);
criterion_main!(benches);
