use criterion::{criterion_group, criterion_main, Criterion};
use ozone_core::{FieldValue, PartyId, SubmissionKind, SubstanceId};
use ozone_rules::{BuildParams, Form, RuleContext, ValidationConfig};

fn imports_form(rows: usize) -> Form {
    let mut form = Form::new();
    let tab = form.tab_mut(SubmissionKind::Imports);
    for i in 0..rows {
        let index = tab.add_row(BuildParams {
            substance: Some(SubstanceId(format!("S-{}", i % 40))),
            country: (i % 3 != 0).then(|| PartyId(format!("P{}", i % 7))),
            ordering_id: Some(i as u32),
            ..Default::default()
        });
        let _ = tab.update_field(
            index,
            "quantity_total_new",
            Some(FieldValue::Number(rust_decimal::Decimal::new((i % 50) as i64, 0))),
        );
        let _ = tab.update_field(
            index,
            "quantity_feedstock",
            Some(FieldValue::Number(rust_decimal::Decimal::new((i % 30) as i64, 1))),
        );
    }
    form
}

fn bench_validate(c: &mut Criterion) {
    let form = imports_form(2_000);
    let cfg = ValidationConfig::default();
    let ctx = RuleContext::new(&cfg, ozone_i18n::builtin(ozone_i18n::Language::En));
    c.bench_function("validate_imports_2000", |b| {
        b.iter(|| {
            let _ = form.validate(&ctx);
        })
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
