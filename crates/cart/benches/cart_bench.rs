use cart::{
    Cart, CartService, InMemoryCartStore, InMemoryCouponValidator, InMemoryPricing, Quantity,
};
use common::{Money, Owner, Sku};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn make_service() -> CartService<InMemoryCartStore, InMemoryPricing, InMemoryCouponValidator> {
    let pricing = InMemoryPricing::new()
        .with_price("SKU-001", Money::from_units(100))
        .with_price("SKU-002", Money::from_units(50));
    let coupons = InMemoryCouponValidator::new().with_percent_coupon("SAVE10", 10);
    CartService::new(InMemoryCartStore::new(), pricing, coupons)
}

fn bench_add_item(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = make_service();
    let owner = Owner::guest();

    c.bench_function("cart/add_item", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .add_item(&owner, Sku::new("SKU-001"), 1)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_add_then_coupon(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_then_apply_coupon", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = make_service();
                let owner = Owner::new("bench");
                service
                    .add_item(&owner, Sku::new("SKU-001"), 2)
                    .await
                    .unwrap();
                service
                    .add_item(&owner, Sku::new("SKU-002"), 1)
                    .await
                    .unwrap();
                service.apply_coupon(&owner, "SAVE10").await.unwrap();
            });
        });
    });
}

fn bench_recalculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart/recalculate");

    for lines in [1usize, 10, 100] {
        let mut cart = Cart::new();
        for i in 0..lines {
            let qty = Quantity::new(2).unwrap();
            cart.add_item(Sku::new(format!("SKU-{i:04}")), qty, Money::from_units(25))
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(lines), &cart, |b, cart| {
            b.iter(|| {
                let mut cart = cart.clone();
                cart.add_item(Sku::new("SKU-0000"), Quantity::new(1).unwrap(), Money::from_units(25))
                    .unwrap();
                cart.total()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_item, bench_add_then_coupon, bench_recalculate);
criterion_main!(benches);
