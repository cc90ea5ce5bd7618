use flare_scope::observability::init_logging;
use flare_scope::{AllowError, Args, BoxError, Endpoints, ErrorKind, Flare, Handler, Lock};

#[derive(Clone)]
struct Member {
    name: String,
    is_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("debug");

    let admin = Flare::<Member>::new()
        .lock(Lock::from_fn(|member: &Member| member.is_admin))
        .scope(Endpoints::new().handler(
            "delete",
            Handler::new(1, |member: Member, args: Args| async move {
                let page: u32 = args.get(0)?;
                Ok::<_, BoxError>(format!("{} deleted page {page}", member.name))
            }),
        ))?;

    let scope = Flare::<Member>::new().scope(
        Endpoints::new().group(
            "page",
            Endpoints::new()
                .handler(
                    "open",
                    Handler::new(1, |member: Member, args: Args| async move {
                        let page: u32 = args.get_or(0, 1)?;
                        Ok::<_, BoxError>(format!("{} opened page {page}", member.name))
                    }),
                )
                .scope("admin", &admin),
        ),
    )?;

    // 1. Render button identifiers
    let next = scope.router().id("page/open", &(2,))?;
    let delete = scope.router().id("page/admin/delete", &(2,))?;
    println!("next button:   {next}");
    println!("delete button: {delete}");

    let guest = Member {
        name: "guest".to_string(),
        is_admin: false,
    };
    let owner = Member {
        name: "owner".to_string(),
        is_admin: true,
    };

    // 2. Clicks
    let out = scope.dispatch(&next, guest.clone()).await?;
    println!("{} -> {}", out.route_path, out.result);

    match scope.dispatch(&delete, guest.clone()).await {
        Ok(out) => println!("unexpected: {}", out.result),
        Err(err) => println!("guest denied: {err}"),
    }

    let out = scope.dispatch(&delete, owner).await?;
    println!("{} -> {}", out.route_path, out.result);

    // 3. A button left over from an older deployment
    let outcome = scope
        .dispatch("zzzzzzzzzz[1]", guest)
        .await
        .allow(ErrorKind::RouteNotFound)?;
    println!("stale button suppressed: {}", outcome.is_suppressed());

    Ok(())
}
